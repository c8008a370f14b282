use heapless::Vec;

use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
    types::{QoS, SubscribeTopic},
};

/// A request for one or more subscriptions, each with a maximum QoS.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscribePacket<'a, const MAX_TOPICS: usize> {
    pub packet_identifier: u16,
    pub topics: Vec<SubscribeTopic<'a>, MAX_TOPICS>,
}

impl<'a, const MAX_TOPICS: usize> SubscribePacket<'a, MAX_TOPICS> {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.topics.is_empty() {
            return Err(Error::MalformedPacket);
        }

        let body_len = 2 + self
            .topics
            .iter()
            .map(SubscribeTopic::encoded_len)
            .sum::<u32>();

        encode_packet(buffer, PacketType::Subscribe, 0x02, body_len, |writer| {
            writer.write_u16(self.packet_identifier)?;
            for topic in &self.topics {
                writer.write_string(topic.filter)?;
                writer.write_u8(topic.qos.into_bits(0))?;
            }
            Ok(())
        })
    }

    pub(crate) fn decode(reader: &mut BuffReader<'a>) -> Result<Self, Error> {
        let packet_identifier = reader.read_u16()?;

        let mut topics = Vec::new();
        while reader.remaining() > 0 {
            let filter = reader.read_string()?;
            let qos_byte = reader.read_u8()?;
            // The upper 6 bits of the requested QoS byte are reserved.
            if qos_byte & 0xFC != 0 {
                return Err(Error::MalformedPacket);
            }
            let qos = QoS::try_from_bits(qos_byte)?;
            topics
                .push(SubscribeTopic::new(filter, qos))
                .map_err(|_| Error::InsufficientBufferSize)?;
        }
        // A SUBSCRIBE without topics is a protocol violation.
        if topics.is_empty() {
            return Err(Error::MalformedPacket);
        }

        Ok(Self {
            packet_identifier,
            topics,
        })
    }
}
