use crate::{
    header::{FixedHeader, PacketType},
    io::{BuffReader, Error},
    packet::encode_packet,
    types::{IdentifiedQoS, MqttString, QoS},
};

/// An application message travelling in either direction.
///
/// The payload is a plain slice rather than a length-prefixed field: it fills
/// whatever the remaining length leaves after the topic and the optional
/// packet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublishPacket<'a> {
    /// Set on retransmissions of QoS 1 and 2 publications.
    pub dup: bool,
    pub retain: bool,
    pub qos: IdentifiedQoS,
    pub topic: MqttString<'a>,
    pub payload: &'a [u8],
}

impl<'a> PublishPacket<'a> {
    fn flags(&self) -> u8 {
        (self.dup as u8) << 3 | self.qos.qos().into_bits(1) | self.retain as u8
    }

    fn body_len(&self) -> u32 {
        let identifier_len = match self.qos.packet_identifier() {
            Some(_) => 2,
            None => 0,
        };
        self.topic.encoded_len() + identifier_len + self.payload.len() as u32
    }

    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.dup && self.qos.packet_identifier().is_none() {
            // The dup flag must be zero at QoS 0.
            return Err(Error::MalformedPacket);
        }

        encode_packet(
            buffer,
            PacketType::Publish,
            self.flags(),
            self.body_len(),
            |writer| {
                writer.write_string(self.topic)?;
                if let Some(pid) = self.qos.packet_identifier() {
                    writer.write_u16(pid)?;
                }
                writer.write_slice(self.payload)
            },
        )
    }

    pub(crate) fn decode(header: &FixedHeader, reader: &mut BuffReader<'a>) -> Result<Self, Error> {
        let flags = header.flags();
        let dup = flags & 0x08 != 0;
        let retain = flags & 0x01 != 0;
        let qos = QoS::try_from_bits((flags >> 1) & 0x03)?;

        let topic = reader.read_string()?;
        let qos = match qos {
            QoS::AtMostOnce => {
                if dup {
                    return Err(Error::MalformedPacket);
                }
                IdentifiedQoS::AtMostOnce
            }
            QoS::AtLeastOnce | QoS::ExactlyOnce => {
                let pid = reader.read_u16()?;
                if pid == 0 {
                    return Err(Error::MalformedPacket);
                }
                match qos {
                    QoS::AtLeastOnce => IdentifiedQoS::AtLeastOnce(pid),
                    _ => IdentifiedQoS::ExactlyOnce(pid),
                }
            }
        };
        let payload = reader.read_remaining();

        Ok(Self {
            dup,
            retain,
            qos,
            topic,
            payload,
        })
    }
}
