use crate::{header::PacketType, io::Error, packet::encode_packet};

/// The client's graceful goodbye. Carries no body; the server discards the
/// will message when it sees this packet before the connection closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisconnectPacket;

impl DisconnectPacket {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        encode_packet(buffer, PacketType::Disconnect, 0x00, 0, |_| Ok(()))
    }
}
