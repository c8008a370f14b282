use heapless::Vec;

use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
    types::QoS,
};

/// The per-topic verdict in a SUBACK packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubackReturnCode {
    /// The subscription was granted at the contained maximum QoS, which may
    /// be lower than requested.
    Success(QoS),
    /// The server refused this subscription.
    Failure,
}

impl SubackReturnCode {
    fn into_byte(self) -> u8 {
        match self {
            Self::Success(qos) => qos.into_bits(0),
            Self::Failure => 0x80,
        }
    }

    fn try_from_byte(byte: u8) -> Result<Self, Error> {
        match byte {
            0x80 => Ok(Self::Failure),
            _ => Ok(Self::Success(QoS::try_from_bits(byte)?)),
        }
    }
}

/// The server's reply to SUBSCRIBE, carrying one return code per requested
/// topic in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubackPacket<const MAX_TOPICS: usize> {
    pub packet_identifier: u16,
    pub return_codes: Vec<SubackReturnCode, MAX_TOPICS>,
}

impl<const MAX_TOPICS: usize> SubackPacket<MAX_TOPICS> {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.return_codes.is_empty() {
            return Err(Error::MalformedPacket);
        }

        let body_len = 2 + self.return_codes.len() as u32;
        encode_packet(buffer, PacketType::Suback, 0x00, body_len, |writer| {
            writer.write_u16(self.packet_identifier)?;
            for code in &self.return_codes {
                writer.write_u8(code.into_byte())?;
            }
            Ok(())
        })
    }

    pub(crate) fn decode(reader: &mut BuffReader<'_>) -> Result<Self, Error> {
        let packet_identifier = reader.read_u16()?;

        let mut return_codes = Vec::new();
        while reader.remaining() > 0 {
            let code = SubackReturnCode::try_from_byte(reader.read_u8()?)?;
            return_codes
                .push(code)
                .map_err(|_| Error::InsufficientBufferSize)?;
        }
        if return_codes.is_empty() {
            return Err(Error::MalformedPacket);
        }

        Ok(Self {
            packet_identifier,
            return_codes,
        })
    }
}
