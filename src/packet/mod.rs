//! Models of the fourteen MQTT 3.1.1 control packets, each with a byte-exact
//! `encode` into a caller-provided buffer and a `decode` from a complete
//! packet slice.

mod acks;
mod connack;
mod connect;
mod disconnect;
mod ping;
mod publish;
mod suback;
mod subscribe;
mod unsubscribe;

pub use acks::{PubackPacket, PubcompPacket, PubrecPacket, PubrelPacket, UnsubackPacket};
pub use connack::{ConnackPacket, ConnectReturnCode};
pub use connect::ConnectPacket;
pub use disconnect::DisconnectPacket;
pub use ping::{PingreqPacket, PingrespPacket};
pub use publish::PublishPacket;
pub use suback::{SubackPacket, SubackReturnCode};
pub use subscribe::SubscribePacket;
pub use unsubscribe::UnsubscribePacket;

use crate::{
    header::{FixedHeader, PacketType},
    io::{BuffReader, BuffWriter, Error},
    types::VarByteInt,
};

/// Any of the fourteen control packets.
///
/// `MAX_TOPICS` bounds the number of entries in the topic lists of the
/// SUBSCRIBE, SUBACK and UNSUBSCRIBE packets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlPacket<'a, const MAX_TOPICS: usize> {
    Connect(ConnectPacket<'a>),
    Connack(ConnackPacket),
    Publish(PublishPacket<'a>),
    Puback(PubackPacket),
    Pubrec(PubrecPacket),
    Pubrel(PubrelPacket),
    Pubcomp(PubcompPacket),
    Subscribe(SubscribePacket<'a, MAX_TOPICS>),
    Suback(SubackPacket<MAX_TOPICS>),
    Unsubscribe(UnsubscribePacket<'a, MAX_TOPICS>),
    Unsuback(UnsubackPacket),
    Pingreq(PingreqPacket),
    Pingresp(PingrespPacket),
    Disconnect(DisconnectPacket),
}

impl<'a, const MAX_TOPICS: usize> ControlPacket<'a, MAX_TOPICS> {
    /// Decodes exactly one packet from `bytes`, which must contain the whole
    /// packet and nothing else.
    ///
    /// The remaining length of the fixed header must match the body that
    /// follows it exactly, in both directions: a truncated body and trailing
    /// garbage both decode as `MalformedPacket`.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, Error> {
        let mut reader = BuffReader::new(bytes);

        let type_and_flags = reader.read_u8()?;
        let packet_type = PacketType::from_type_and_flags(type_and_flags)?;
        packet_type.validate_flags(type_and_flags & 0x0F)?;
        let remaining_len = VarByteInt::read(&mut reader)?;
        let header = FixedHeader {
            type_and_flags,
            remaining_len,
        };

        if remaining_len.size() != reader.remaining() {
            return Err(Error::MalformedPacket);
        }

        let packet = Self::decode_body(packet_type, &header, &mut reader)
            // The body is complete, so running dry means the lengths inside
            // it are inconsistent with the remaining length.
            .map_err(|e| match e {
                Error::InsufficientData => Error::MalformedPacket,
                other => other,
            })?;

        if reader.remaining() != 0 {
            return Err(Error::MalformedPacket);
        }
        Ok(packet)
    }

    fn decode_body(
        packet_type: PacketType,
        header: &FixedHeader,
        reader: &mut BuffReader<'a>,
    ) -> Result<Self, Error> {
        Ok(match packet_type {
            PacketType::Connect => Self::Connect(ConnectPacket::decode(reader)?),
            PacketType::Connack => Self::Connack(ConnackPacket::decode(reader)?),
            PacketType::Publish => Self::Publish(PublishPacket::decode(header, reader)?),
            PacketType::Puback => Self::Puback(PubackPacket::decode(reader)?),
            PacketType::Pubrec => Self::Pubrec(PubrecPacket::decode(reader)?),
            PacketType::Pubrel => Self::Pubrel(PubrelPacket::decode(reader)?),
            PacketType::Pubcomp => Self::Pubcomp(PubcompPacket::decode(reader)?),
            PacketType::Subscribe => Self::Subscribe(SubscribePacket::decode(reader)?),
            PacketType::Suback => Self::Suback(SubackPacket::decode(reader)?),
            PacketType::Unsubscribe => Self::Unsubscribe(UnsubscribePacket::decode(reader)?),
            PacketType::Unsuback => Self::Unsuback(UnsubackPacket::decode(reader)?),
            PacketType::Pingreq => Self::Pingreq(PingreqPacket),
            PacketType::Pingresp => Self::Pingresp(PingrespPacket),
            PacketType::Disconnect => Self::Disconnect(DisconnectPacket),
        })
    }

    /// Encodes the packet into `buffer` and returns the number of bytes
    /// written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        match self {
            Self::Connect(p) => p.encode(buffer),
            Self::Connack(p) => p.encode(buffer),
            Self::Publish(p) => p.encode(buffer),
            Self::Puback(p) => p.encode(buffer),
            Self::Pubrec(p) => p.encode(buffer),
            Self::Pubrel(p) => p.encode(buffer),
            Self::Pubcomp(p) => p.encode(buffer),
            Self::Subscribe(p) => p.encode(buffer),
            Self::Suback(p) => p.encode(buffer),
            Self::Unsubscribe(p) => p.encode(buffer),
            Self::Unsuback(p) => p.encode(buffer),
            Self::Pingreq(p) => p.encode(buffer),
            Self::Pingresp(p) => p.encode(buffer),
            Self::Disconnect(p) => p.encode(buffer),
        }
    }
}

/// Writes a fixed header followed by a body of `body_len` bytes produced by
/// `body`, returning the total number of bytes written.
pub(crate) fn encode_packet(
    buffer: &mut [u8],
    packet_type: PacketType,
    flags: u8,
    body_len: u32,
    body: impl FnOnce(&mut BuffWriter<'_>) -> Result<(), Error>,
) -> Result<usize, Error> {
    let remaining_len = VarByteInt::try_from(body_len)?;
    let mut writer = BuffWriter::new(buffer);
    FixedHeader::new(packet_type, flags, remaining_len).write(&mut writer)?;
    body(&mut writer)?;
    Ok(writer.position())
}
