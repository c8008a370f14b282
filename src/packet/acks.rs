use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
};

/// The five acknowledgement packets share a body of exactly one packet
/// identifier. PUBREL is the only one whose fixed header flags are `0x02`
/// instead of `0x00`.
macro_rules! identified_packet {
    ($(#[$doc:meta])* $name:ident, $packet_type:expr, $flags:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            pub packet_identifier: u16,
        }

        impl $name {
            pub const fn new(packet_identifier: u16) -> Self {
                Self { packet_identifier }
            }

            pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
                encode_packet(buffer, $packet_type, $flags, 2, |writer| {
                    writer.write_u16(self.packet_identifier)
                })
            }

            pub(crate) fn decode(reader: &mut BuffReader<'_>) -> Result<Self, Error> {
                Ok(Self {
                    packet_identifier: reader.read_u16()?,
                })
            }
        }
    };
}

identified_packet!(
    /// Acknowledges reception of a QoS 1 PUBLISH.
    PubackPacket,
    PacketType::Puback,
    0x00
);
identified_packet!(
    /// First acknowledgement of a QoS 2 PUBLISH.
    PubrecPacket,
    PacketType::Pubrec,
    0x00
);
identified_packet!(
    /// Releases a QoS 2 publication after PUBREC.
    PubrelPacket,
    PacketType::Pubrel,
    0x02
);
identified_packet!(
    /// Completes a QoS 2 handshake after PUBREL.
    PubcompPacket,
    PacketType::Pubcomp,
    0x00
);
identified_packet!(
    /// Acknowledges an UNSUBSCRIBE request.
    UnsubackPacket,
    PacketType::Unsuback,
    0x00
);
