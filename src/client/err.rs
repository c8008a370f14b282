use crate::{io, packet::ConnectReturnCode};

/// The main error returned by `Client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A packet could not be encoded or decoded.
    Codec(io::Error),

    /// The server sent a packet that is not valid at this point of the
    /// protocol flow, or one only clients may send.
    ///
    /// The connection should be closed.
    UnexpectedPacket,

    /// The server rejected the CONNECT attempt with the contained return
    /// code. The client is disconnected again.
    ConnectionRefused(ConnectReturnCode),

    /// `connect` was called while a connection is established or being
    /// established.
    AlreadyConnected,

    /// An operation that requires an established connection was called
    /// before CONNACK was received.
    NotConnected,

    /// The server did not answer a PINGREQ within the keep alive interval.
    ///
    /// The connection should be closed and re-established.
    KeepAliveExpired,

    /// `republish` was called with a packet identifier that is not tracked
    /// as in flight, or whose in-flight state does not match the requested
    /// QoS.
    UnknownPacketIdentifier,

    /// All 65535 packet identifiers are tied to unacknowledged packets.
    ///
    /// Try again after an acknowledgement freed one.
    PacketIdentifiersExhausted,

    /// An internal buffer used for tracking session state is full.
    ///
    /// Try again after an event indicated that a slot is free again.
    SessionBuffer,

    /// `subscribe` or `unsubscribe` was called with no topics.
    EmptyTopicList,
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Codec(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "codec error: {}", e),
            Self::UnexpectedPacket => write!(f, "unexpected packet"),
            Self::ConnectionRefused(code) => write!(f, "connection refused: {:?}", code),
            Self::AlreadyConnected => write!(f, "already connected"),
            Self::NotConnected => write!(f, "not connected"),
            Self::KeepAliveExpired => write!(f, "keep alive expired"),
            Self::UnknownPacketIdentifier => write!(f, "packet identifier not in flight"),
            Self::PacketIdentifiersExhausted => write!(f, "packet identifiers exhausted"),
            Self::SessionBuffer => write!(f, "session tracking buffer full"),
            Self::EmptyTopicList => write!(f, "empty topic list"),
        }
    }
}

impl core::error::Error for Error {}
