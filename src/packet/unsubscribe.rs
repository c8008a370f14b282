use heapless::Vec;

use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::encode_packet,
    types::MqttString,
};

/// A request to drop one or more subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsubscribePacket<'a, const MAX_TOPICS: usize> {
    pub packet_identifier: u16,
    pub topics: Vec<MqttString<'a>, MAX_TOPICS>,
}

impl<'a, const MAX_TOPICS: usize> UnsubscribePacket<'a, MAX_TOPICS> {
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.topics.is_empty() {
            return Err(Error::MalformedPacket);
        }

        let body_len = 2 + self
            .topics
            .iter()
            .map(MqttString::encoded_len)
            .sum::<u32>();

        encode_packet(buffer, PacketType::Unsubscribe, 0x02, body_len, |writer| {
            writer.write_u16(self.packet_identifier)?;
            for topic in &self.topics {
                writer.write_string(*topic)?;
            }
            Ok(())
        })
    }

    pub(crate) fn decode(reader: &mut BuffReader<'a>) -> Result<Self, Error> {
        let packet_identifier = reader.read_u16()?;

        let mut topics = Vec::new();
        while reader.remaining() > 0 {
            topics
                .push(reader.read_string()?)
                .map_err(|_| Error::InsufficientBufferSize)?;
        }
        if topics.is_empty() {
            return Err(Error::MalformedPacket);
        }

        Ok(Self {
            packet_identifier,
            topics,
        })
    }
}
