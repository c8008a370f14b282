//! Option bundles for the client's outgoing operations.

use crate::types::{MqttBinary, MqttString, QoS, Will};

/// Options for `Client::connect`.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectOptions<'o> {
    /// The client identifier presented to the server.
    pub client_identifier: MqttString<'o>,
    /// Maximum silence between client packets, in seconds. Zero disables the
    /// keep alive mechanism.
    pub keep_alive_seconds: u16,
    /// Whether the server must discard any stored session and the client
    /// drops its own in-flight tracking.
    pub clean_session: bool,
    /// A message the server publishes if the connection dies ungracefully.
    pub will: Option<Will<'o>>,
    pub username: Option<MqttString<'o>>,
    /// Requires `username` to also be set.
    pub password: Option<MqttBinary<'o>>,
}

/// Options for `Client::publish` and `Client::republish`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublicationOptions<'o> {
    /// The topic to publish to. Must not contain wildcards.
    pub topic: MqttString<'o>,
    /// The delivery level of the publication.
    pub qos: QoS,
    /// Whether the server should retain the message for future subscribers.
    pub retain: bool,
}
