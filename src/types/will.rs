use crate::types::{MqttBinary, MqttString, QoS};

/// A will message the server publishes on behalf of the client when the
/// connection closes without a DISCONNECT packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Will<'a> {
    /// The topic the will message is published to. Must not be empty.
    pub topic: MqttString<'a>,
    /// The payload of the will message.
    pub payload: MqttBinary<'a>,
    /// The Quality of Service of the will publication.
    pub qos: QoS,
    /// Whether the will message is retained by the server.
    pub retain: bool,
}

impl<'a> Will<'a> {
    pub const fn new(
        topic: MqttString<'a>,
        payload: MqttBinary<'a>,
        qos: QoS,
        retain: bool,
    ) -> Self {
        Self {
            topic,
            payload,
            qos,
            retain,
        }
    }

    pub(crate) const fn encoded_len(&self) -> u32 {
        self.topic.encoded_len() + self.payload.encoded_len()
    }
}
