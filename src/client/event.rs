//! Contains the main `Event` and content types the client can emit.

use heapless::Vec;

use crate::{
    packet::SubackReturnCode,
    session::StoredMessage,
    types::{MqttString, QoS},
};

/// Events emitted by the client when receiving an MQTT packet.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event<'e, const MAX_TOPICS: usize, const MAX_MESSAGE_SIZE: usize> {
    /// The server accepted the CONNECT attempt; the connection is
    /// established.
    Connected {
        /// Whether the server resumed a stored session.
        session_present: bool,
    },

    /// The server sent a PINGRESP packet; the pending keep alive probe is
    /// complete.
    Pingresp,

    /// The server sent a QoS 0 or QoS 1 PUBLISH packet.
    ///
    /// For QoS 1, a PUBACK packet has been placed in the reply buffer.
    Message(Message<'e>),

    /// The server sent the PUBREL of a QoS 2 publication.
    ///
    /// The withheld message is handed out here, exactly once. A PUBCOMP
    /// packet has been placed in the reply buffer.
    MessageReleased(StoredMessage<MAX_MESSAGE_SIZE>),

    /// The server sent a SUBACK packet matching a SUBSCRIBE packet, carrying
    /// one return code per requested topic in request order.
    Suback {
        packet_identifier: u16,
        return_codes: Vec<SubackReturnCode, MAX_TOPICS>,
    },

    /// The server sent an UNSUBACK packet matching an UNSUBSCRIBE packet.
    Unsuback { packet_identifier: u16 },

    /// The server sent a PUBACK packet matching a QoS 1 PUBLISH packet.
    ///
    /// The QoS 1 publication process is complete, the PUBLISH packet won't
    /// have to be resent.
    PublishAcknowledged { packet_identifier: u16 },

    /// The server sent a PUBREC packet matching a QoS 2 PUBLISH packet.
    ///
    /// A PUBREL packet has been placed in the reply buffer. The PUBLISH
    /// packet won't have to be resent.
    PublishReceived { packet_identifier: u16 },

    /// The server sent a PUBCOMP packet matching a QoS 2 PUBREL packet.
    ///
    /// The QoS 2 publication process is complete.
    PublishComplete { packet_identifier: u16 },

    /// The server sent an acknowledgement with a packet identifier that is
    /// not in flight (anymore). The packet was dropped, except for a PUBREL
    /// which is still answered with a PUBCOMP.
    Ignored,

    /// The server resent a QoS 2 PUBLISH whose message is already withheld.
    ///
    /// A PUBREC packet has been placed in the reply buffer; the message is
    /// not delivered again.
    Duplicate,
}

/// Content of `Event::Message`.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message<'m> {
    /// The exact topic of this publication.
    pub topic: MqttString<'m>,
    /// The application message of this publication.
    pub payload: &'m [u8],
    /// The delivery level the server used, at most 1 here.
    pub qos: QoS,
    /// Whether the server already attempted to deliver this publication.
    pub dup: bool,
    /// Whether the publication is the result of a retained message.
    pub retain: bool,
}
