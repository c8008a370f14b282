use heapless::{String, Vec};

use crate::types::QoS;

/// An incomplete QoS 1 or 2 publication by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InFlightPublish {
    /// The packet identifier of the publication process.
    pub packet_identifier: u16,
    /// The state of the publication process.
    pub state: CPublishFlightState,
}

/// The state of an incomplete QoS 1 or 2 publication by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CPublishFlightState {
    /// A QoS 1 PUBLISH packet has been sent.
    /// The next step in the handshake is the server sending a PUBACK packet.
    AwaitingPuback,
    /// A QoS 2 PUBLISH packet has been sent.
    /// The next step in the handshake is the server sending a PUBREC packet.
    AwaitingPubrec,
    /// A PUBREC packet has been received and responded to with a PUBREL packet.
    /// The last step in the handshake is the server sending a PUBCOMP packet.
    AwaitingPubcomp,
}

/// An incomplete QoS 2 publication by the server.
///
/// The message is withheld here between PUBREC and PUBREL so retransmitted
/// PUBLISH packets do not reach the application twice. It is handed out
/// exactly once, when the PUBREL arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedPublish<const MAX_MESSAGE_SIZE: usize> {
    /// The packet identifier of the publication process.
    pub packet_identifier: u16,
    /// The withheld application message.
    pub message: StoredMessage<MAX_MESSAGE_SIZE>,
}

/// An application message copied out of a QoS 2 PUBLISH packet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredMessage<const MAX_MESSAGE_SIZE: usize> {
    /// The exact topic of the publication.
    pub topic: String<MAX_MESSAGE_SIZE>,
    /// The application message of the publication.
    pub payload: Vec<u8, MAX_MESSAGE_SIZE>,
    /// The retain flag of the PUBLISH packet.
    pub retain: bool,
}

impl<const MAX_MESSAGE_SIZE: usize> StoredMessage<MAX_MESSAGE_SIZE> {
    /// The delivery level is fixed: only QoS 2 publications are stored.
    pub const fn qos(&self) -> QoS {
        QoS::ExactlyOnce
    }
}
