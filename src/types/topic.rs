use crate::types::{MqttString, QoS};

/// A topic filter together with the maximum Quality of Service the client
/// requests for publications matching it. SUBSCRIBE packets carry a list of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscribeTopic<'a> {
    /// The topic filter, which may contain the `+` and `#` wildcards.
    pub filter: MqttString<'a>,
    /// The maximum Quality of Service the server may use when forwarding
    /// publications matching `filter`.
    pub qos: QoS,
}

impl<'a> SubscribeTopic<'a> {
    pub const fn new(filter: MqttString<'a>, qos: QoS) -> Self {
        Self { filter, qos }
    }

    /// Length prefix plus filter bytes plus the requested QoS byte.
    pub(crate) const fn encoded_len(&self) -> u32 {
        self.filter.encoded_len() + 1
    }
}
