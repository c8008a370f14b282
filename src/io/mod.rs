//! Byte-level reading and writing of packet fields, plus the incremental
//! parser that reassembles packets from arbitrarily fragmented input.

mod codec;
mod reader;
mod writer;

pub use codec::{ParseOutcome, ReadContext};
pub(crate) use reader::BuffReader;
pub(crate) use writer::BuffWriter;

/// Errors raised while encoding or decoding packet bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A value does not fit its wire representation, such as a string longer
    /// than 65535 bytes or a remaining length above the 4-byte limit.
    ValueOutOfRange,
    /// A variable byte integer used a non-minimal encoding or carried a
    /// continuation bit in its 4th byte.
    MalformedRemainingLength,
    /// The input ended before a complete field could be read. Recoverable
    /// while parsing a fixed header; fatal inside a packet body.
    InsufficientData,
    /// A length-prefixed string overran its packet or contained invalid
    /// UTF-8.
    MalformedString,
    /// The fixed header carried a reserved packet type or flag bits that are
    /// invalid for its packet type.
    MalformedFixedHeader,
    /// A packet body violated the protocol, such as a QoS of 3 or a
    /// remaining length inconsistent with the body.
    MalformedPacket,
    /// The output buffer is too small for the encoded packet, or an incoming
    /// packet exceeds the read context's buffer capacity.
    InsufficientBufferSize,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValueOutOfRange => write!(f, "value does not fit its wire representation"),
            Self::MalformedRemainingLength => {
                write!(f, "malformed variable byte integer")
            }
            Self::InsufficientData => write!(f, "input ended before a complete field"),
            Self::MalformedString => write!(f, "malformed UTF-8 string field"),
            Self::MalformedFixedHeader => write!(f, "malformed fixed header"),
            Self::MalformedPacket => write!(f, "malformed packet body"),
            Self::InsufficientBufferSize => write!(f, "buffer too small"),
        }
    }
}

impl core::error::Error for Error {}
