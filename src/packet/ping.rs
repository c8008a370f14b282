use crate::{header::PacketType, io::Error, packet::encode_packet};

/// The client's keep alive probe. Carries no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingreqPacket;

impl PingreqPacket {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        encode_packet(buffer, PacketType::Pingreq, 0x00, 0, |_| Ok(()))
    }
}

/// The server's reply to PINGREQ. Carries no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingrespPacket;

impl PingrespPacket {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        encode_packet(buffer, PacketType::Pingresp, 0x00, 0, |_| Ok(()))
    }
}
