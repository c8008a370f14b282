//! Implements the client-side protocol flows over caller-provided buffers:
//! connection establishment, both directions of the QoS handshakes,
//! subscription management and keep alive.

use heapless::{String, Vec};

use crate::{
    client::{
        event::{Event, Message},
        keep_alive::KeepAlive,
        options::{ConnectOptions, PublicationOptions},
    },
    packet::{
        ConnackPacket, ConnectPacket, ConnectReturnCode, ControlPacket, DisconnectPacket,
        PingreqPacket, PubackPacket, PubcompPacket, PublishPacket, PubrecPacket, PubrelPacket,
        SubscribePacket, UnsubscribePacket,
    },
    session::{CPublishFlightState, Session, StoredMessage},
    types::{IdentifiedQoS, MqttString, QoS, SubscribeTopic},
};

mod err;
mod keep_alive;

pub mod event;
pub mod options;

pub use err::Error;

/// Where the client stands in the connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// No connection attempt is in progress.
    Disconnected,
    /// A CONNECT packet has been produced; the next expected packet is the
    /// server's CONNACK.
    ConnectSent,
    /// The server accepted the connection.
    Connected,
}

/// What `Client::receive` made of an incoming packet.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response<'p, const MAX_TOPICS: usize, const MAX_MESSAGE_SIZE: usize> {
    /// The event to surface to the application, if any. QoS 2 PUBLISH
    /// packets produce no event until their PUBREL releases the message.
    pub event: Option<Event<'p, MAX_TOPICS, MAX_MESSAGE_SIZE>>,
    /// Length of the reply packet placed in the reply buffer; zero when no
    /// reply is owed.
    pub reply_len: usize,
}

/// An MQTT 3.1.1 client state machine.
///
/// The client performs no I/O. Outgoing operations encode a packet into a
/// caller-provided buffer and return its length; incoming packets are handed
/// to [`Client::receive`] after reassembly, which updates the handshake state
/// and encodes any owed reply. Time is passed in as milliseconds of an
/// arbitrary monotonic clock.
///
/// `MAX_IN_FLIGHT` bounds unacknowledged publications per direction,
/// `MAX_SUBSCRIBES` concurrently unacknowledged (UN)SUBSCRIBE requests and
/// `MAX_MESSAGE_SIZE` the topic and payload of a withheld QoS 2 message.
#[derive(Debug)]
pub struct Client<const MAX_IN_FLIGHT: usize, const MAX_SUBSCRIBES: usize, const MAX_MESSAGE_SIZE: usize>
{
    state: ConnectionState,
    session: Session<MAX_IN_FLIGHT, MAX_MESSAGE_SIZE>,

    packet_identifier_counter: u16,

    /// sent SUBSCRIBE packets
    pending_suback: Vec<u16, MAX_SUBSCRIBES>,
    /// sent UNSUBSCRIBE packets
    pending_unsuback: Vec<u16, MAX_SUBSCRIBES>,

    keep_alive: KeepAlive,
}

impl<const MAX_IN_FLIGHT: usize, const MAX_SUBSCRIBES: usize, const MAX_MESSAGE_SIZE: usize> Default
    for Client<MAX_IN_FLIGHT, MAX_SUBSCRIBES, MAX_MESSAGE_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_IN_FLIGHT: usize, const MAX_SUBSCRIBES: usize, const MAX_MESSAGE_SIZE: usize>
    Client<MAX_IN_FLIGHT, MAX_SUBSCRIBES, MAX_MESSAGE_SIZE>
{
    /// Creates a new, disconnected client with a fresh session.
    pub const fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            session: Session {
                pending_client_publishes: Vec::new(),
                pending_server_publishes: Vec::new(),
            },

            packet_identifier_counter: 1,

            pending_suback: Vec::new(),
            pending_unsuback: Vec::new(),

            keep_alive: KeepAlive::new(0, 0),
        }
    }

    #[inline]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns session related tracking information.
    #[inline]
    pub fn session(&self) -> &Session<MAX_IN_FLIGHT, MAX_MESSAGE_SIZE> {
        &self.session
    }

    fn is_packet_identifier_used(&self, packet_identifier: u16) -> bool {
        self.session
            .is_used_cpublish_packet_identifier(packet_identifier)
            || self.pending_suback.contains(&packet_identifier)
            || self.pending_unsuback.contains(&packet_identifier)
    }

    /// Generates a new packet identifier, skipping zero and every identifier
    /// tied to an unacknowledged packet.
    fn packet_identifier(&mut self) -> Result<u16, Error> {
        for _ in 0..u16::MAX {
            let packet_identifier = self.packet_identifier_counter;
            self.packet_identifier_counter = match self.packet_identifier_counter {
                u16::MAX => 1,
                i => i + 1,
            };

            if !self.is_packet_identifier_used(packet_identifier) {
                return Ok(packet_identifier);
            }
        }

        Err(Error::PacketIdentifiersExhausted)
    }

    /// Returns true if the packet identifier existed.
    fn remove_packet_identifier_if_exists(vec: &mut Vec<u16, MAX_SUBSCRIBES>, pid: u16) -> bool {
        if let Some(i) = vec.iter().position(|p| *p == pid) {
            vec.swap_remove(i);
            true
        } else {
            false
        }
    }

    fn require_connected(&self) -> Result<(), Error> {
        match self.state {
            ConnectionState::Connected => Ok(()),
            _ => Err(Error::NotConnected),
        }
    }

    /// Encodes a CONNECT packet into `buffer` and starts awaiting CONNACK.
    ///
    /// With `clean_session` set, any in-flight tracking from a previous
    /// connection is dropped; without it, `republish` and `rerelease` can
    /// resume the unfinished handshakes after the CONNACK arrives.
    pub fn connect(
        &mut self,
        now_millis: u64,
        options: &ConnectOptions<'_>,
        buffer: &mut [u8],
    ) -> Result<usize, Error> {
        if self.state != ConnectionState::Disconnected {
            return Err(Error::AlreadyConnected);
        }

        let packet = ConnectPacket {
            client_identifier: options.client_identifier,
            keep_alive_seconds: options.keep_alive_seconds,
            clean_session: options.clean_session,
            will: options.will,
            username: options.username,
            password: options.password,
        };

        debug!("sending CONNECT packet");
        let len = packet.encode(buffer)?;

        if options.clean_session {
            self.session.clear();
        }
        self.pending_suback.clear();
        self.pending_unsuback.clear();

        self.keep_alive = KeepAlive::new(options.keep_alive_seconds, now_millis);
        self.state = ConnectionState::ConnectSent;

        Ok(len)
    }

    /// Publish a message. For QoS greater than 0 the handshake is tracked
    /// under the returned non-zero packet identifier; QoS 0 returns the
    /// escape value 0.
    ///
    /// Returns the packet identifier and the encoded length.
    pub fn publish(
        &mut self,
        now_millis: u64,
        options: &PublicationOptions<'_>,
        message: &[u8],
        buffer: &mut [u8],
    ) -> Result<(u16, usize), Error> {
        self.require_connected()?;

        if options.qos > QoS::AtMostOnce
            && self.session.in_flight_cpublishes() == MAX_IN_FLIGHT
        {
            warn!("maximum concurrent publications reached");
            return Err(Error::SessionBuffer);
        }

        let (identified_qos, packet_identifier) = match options.qos {
            QoS::AtMostOnce => (IdentifiedQoS::AtMostOnce, 0),
            QoS::AtLeastOnce => {
                let pid = self.packet_identifier()?;
                (IdentifiedQoS::AtLeastOnce(pid), pid)
            }
            QoS::ExactlyOnce => {
                let pid = self.packet_identifier()?;
                (IdentifiedQoS::ExactlyOnce(pid), pid)
            }
        };

        let packet = PublishPacket {
            dup: false,
            retain: options.retain,
            qos: identified_qos,
            topic: options.topic,
            payload: message,
        };

        debug!(
            "sending PUBLISH packet with packet identifier {}",
            packet_identifier
        );
        let len = packet.encode(buffer)?;

        match options.qos {
            QoS::AtMostOnce => {}
            QoS::AtLeastOnce => {
                self.session
                    .track_cpublish(packet_identifier, CPublishFlightState::AwaitingPuback)
                    .map_err(|_| Error::SessionBuffer)?;
            }
            QoS::ExactlyOnce => {
                self.session
                    .track_cpublish(packet_identifier, CPublishFlightState::AwaitingPubrec)
                    .map_err(|_| Error::SessionBuffer)?;
            }
        }

        self.keep_alive.note_send(now_millis);
        Ok((packet_identifier, len))
    }

    /// Resends an unacknowledged PUBLISH packet with the DUP flag set.
    ///
    /// Call this after resuming a session, or when an acknowledgement stays
    /// out for longer than the application tolerates. The packet identifier
    /// must be in flight awaiting PUBACK (QoS 1) or PUBREC (QoS 2).
    pub fn republish(
        &mut self,
        now_millis: u64,
        packet_identifier: u16,
        options: &PublicationOptions<'_>,
        message: &[u8],
        buffer: &mut [u8],
    ) -> Result<usize, Error> {
        self.require_connected()?;

        let expected = match options.qos {
            QoS::AtMostOnce => return Err(Error::UnknownPacketIdentifier),
            QoS::AtLeastOnce => CPublishFlightState::AwaitingPuback,
            QoS::ExactlyOnce => CPublishFlightState::AwaitingPubrec,
        };
        if self.session.cpublish_flight_state(packet_identifier) != Some(expected) {
            warn!(
                "packet identifier {} not in flight or not in correct in-flight state",
                packet_identifier
            );
            return Err(Error::UnknownPacketIdentifier);
        }

        let identified_qos = match options.qos {
            QoS::AtLeastOnce => IdentifiedQoS::AtLeastOnce(packet_identifier),
            _ => IdentifiedQoS::ExactlyOnce(packet_identifier),
        };
        let packet = PublishPacket {
            dup: true,
            retain: options.retain,
            qos: identified_qos,
            topic: options.topic,
            payload: message,
        };

        debug!(
            "resending PUBLISH packet with packet identifier {}",
            packet_identifier
        );
        let len = packet.encode(buffer)?;
        self.keep_alive.note_send(now_millis);
        Ok(len)
    }

    /// Resends all pending PUBREL packets back to back into `buffer`.
    ///
    /// Call this after resuming a session. Returns the total encoded length,
    /// zero when nothing is pending.
    pub fn rerelease(&mut self, now_millis: u64, buffer: &mut [u8]) -> Result<usize, Error> {
        self.require_connected()?;

        let mut len = 0;
        for packet_identifier in self.session.pending_releases() {
            len += PubrelPacket::new(packet_identifier).encode(&mut buffer[len..])?;
        }

        if len > 0 {
            self.keep_alive.note_send(now_millis);
        }
        Ok(len)
    }

    /// Encodes a SUBSCRIBE packet for the given topics.
    ///
    /// The packet identifier is tracked until the matching `Event::Suback`
    /// arrives. If none does within a custom time, this method can be used
    /// to send the SUBSCRIBE packet again.
    ///
    /// Returns the packet identifier and the encoded length.
    pub fn subscribe<const MAX_TOPICS: usize>(
        &mut self,
        now_millis: u64,
        topics: &[SubscribeTopic<'_>],
        buffer: &mut [u8],
    ) -> Result<(u16, usize), Error> {
        self.require_connected()?;
        if topics.is_empty() {
            return Err(Error::EmptyTopicList);
        }
        if self.pending_suback.len() == MAX_SUBSCRIBES {
            warn!("maximum concurrent subscriptions reached");
            return Err(Error::SessionBuffer);
        }

        let pid = self.packet_identifier()?;
        let packet = SubscribePacket::<MAX_TOPICS> {
            packet_identifier: pid,
            topics: Vec::from_slice(topics).map_err(|_| Error::SessionBuffer)?,
        };

        debug!("sending SUBSCRIBE packet with packet identifier {}", pid);
        let len = packet.encode(buffer)?;

        // Capacity was checked above.
        let _ = self.pending_suback.push(pid);
        self.keep_alive.note_send(now_millis);
        Ok((pid, len))
    }

    /// Encodes an UNSUBSCRIBE packet for the given topics.
    ///
    /// The packet identifier is tracked until the matching `Event::Unsuback`
    /// arrives, like with `subscribe`.
    ///
    /// Returns the packet identifier and the encoded length.
    pub fn unsubscribe<const MAX_TOPICS: usize>(
        &mut self,
        now_millis: u64,
        topics: &[MqttString<'_>],
        buffer: &mut [u8],
    ) -> Result<(u16, usize), Error> {
        self.require_connected()?;
        if topics.is_empty() {
            return Err(Error::EmptyTopicList);
        }
        if self.pending_unsuback.len() == MAX_SUBSCRIBES {
            warn!("maximum concurrent unsubscriptions reached");
            return Err(Error::SessionBuffer);
        }

        let pid = self.packet_identifier()?;
        let packet = UnsubscribePacket::<MAX_TOPICS> {
            packet_identifier: pid,
            topics: Vec::from_slice(topics).map_err(|_| Error::SessionBuffer)?,
        };

        debug!("sending UNSUBSCRIBE packet with packet identifier {}", pid);
        let len = packet.encode(buffer)?;

        let _ = self.pending_unsuback.push(pid);
        self.keep_alive.note_send(now_millis);
        Ok((pid, len))
    }

    /// Encodes a PINGREQ packet when the keep alive interval has elapsed
    /// without outgoing traffic, returning 0 when no ping is due yet.
    ///
    /// Fails with `KeepAliveExpired` when an earlier PINGREQ went unanswered
    /// past its deadline; the client is disconnected then and the caller
    /// should close the connection.
    pub fn send_ping_if_due(&mut self, now_millis: u64, buffer: &mut [u8]) -> Result<usize, Error> {
        self.require_connected()?;

        if self.keep_alive.timed_out(now_millis) {
            warn!("server did not answer PINGREQ in time");
            self.state = ConnectionState::Disconnected;
            return Err(Error::KeepAliveExpired);
        }
        if !self.keep_alive.needs_ping(now_millis) {
            return Ok(0);
        }

        debug!("sending PINGREQ packet");
        let len = PingreqPacket.encode(buffer)?;
        self.keep_alive.note_ping(now_millis);
        Ok(len)
    }

    /// Encodes a DISCONNECT packet and leaves the connection gracefully.
    ///
    /// The server discards the will message when it sees this packet. The
    /// session tracking is kept so a later connection without clean session
    /// can resume the unfinished handshakes.
    pub fn disconnect(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.require_connected()?;

        debug!("sending DISCONNECT packet");
        let len = DisconnectPacket.encode(buffer)?;
        self.state = ConnectionState::Disconnected;
        Ok(len)
    }

    /// Processes one packet received from the server.
    ///
    /// Advances the connection and handshake state, encodes any owed reply
    /// into `reply` and surfaces an [`Event`] to the application.
    pub fn receive<'p, const MAX_TOPICS: usize>(
        &mut self,
        now_millis: u64,
        packet: &ControlPacket<'p, MAX_TOPICS>,
        reply: &mut [u8],
    ) -> Result<Response<'p, MAX_TOPICS, MAX_MESSAGE_SIZE>, Error> {
        match self.state {
            ConnectionState::Disconnected => return Err(Error::NotConnected),
            ConnectionState::ConnectSent => {
                return match packet {
                    ControlPacket::Connack(connack) => self.handle_connack(connack),
                    _ => Err(Error::UnexpectedPacket),
                };
            }
            ConnectionState::Connected => {}
        }

        let (event, reply_len) = match packet {
            ControlPacket::Pingresp(_) => {
                debug!("received PINGRESP packet");
                self.keep_alive.note_pong();
                (Some(Event::Pingresp), 0)
            }
            ControlPacket::Publish(publish) => self.handle_publish(publish, reply)?,
            ControlPacket::Puback(puback) => {
                let pid = puback.packet_identifier;
                // The exchange is only destroyed once the PUBACK matched it.
                match self.session.cpublish_flight_state(pid) {
                    Some(CPublishFlightState::AwaitingPuback) => {
                        debug!("publication with packet identifier {} complete", pid);
                        self.session.remove_cpublish(pid);
                        (
                            Some(Event::PublishAcknowledged {
                                packet_identifier: pid,
                            }),
                            0,
                        )
                    }
                    Some(_) => {
                        warn!("PUBACK for packet identifier {} in QoS 2 flight", pid);
                        return Err(Error::UnexpectedPacket);
                    }
                    None => {
                        warn!("packet identifier {} in PUBACK not in use", pid);
                        (Some(Event::Ignored), 0)
                    }
                }
            }
            ControlPacket::Pubrec(pubrec) => {
                let pid = pubrec.packet_identifier;
                match self.session.cpublish_flight_state(pid) {
                    // A lost PUBREL leads to a repeated PUBREC while already
                    // awaiting PUBCOMP; answer it again.
                    Some(
                        CPublishFlightState::AwaitingPubrec | CPublishFlightState::AwaitingPubcomp,
                    ) => {
                        debug!("sending PUBREL packet for packet identifier {}", pid);
                        // Encode before touching the flight so a reply buffer
                        // that is too small leaves the exchange intact.
                        let len = PubrelPacket::new(pid).encode(reply)?;
                        self.session
                            .advance_cpublish(pid, CPublishFlightState::AwaitingPubcomp);
                        (
                            Some(Event::PublishReceived {
                                packet_identifier: pid,
                            }),
                            len,
                        )
                    }
                    Some(CPublishFlightState::AwaitingPuback) => {
                        warn!("PUBREC for packet identifier {} in QoS 1 flight", pid);
                        return Err(Error::UnexpectedPacket);
                    }
                    None => {
                        warn!("packet identifier {} in PUBREC not in use", pid);
                        (Some(Event::Ignored), 0)
                    }
                }
            }
            ControlPacket::Pubrel(pubrel) => {
                let pid = pubrel.packet_identifier;
                // PUBCOMP is owed even for an unknown identifier, otherwise a
                // server retrying a PUBREL whose PUBCOMP was lost never stops.
                let len = PubcompPacket::new(pid).encode(reply)?;
                match self.session.remove_spublish(pid) {
                    Some(message) => {
                        debug!("releasing message with packet identifier {}", pid);
                        (Some(Event::MessageReleased(message)), len)
                    }
                    None => {
                        warn!("packet identifier {} in PUBREL not in use", pid);
                        (Some(Event::Ignored), len)
                    }
                }
            }
            ControlPacket::Pubcomp(pubcomp) => {
                let pid = pubcomp.packet_identifier;
                match self.session.cpublish_flight_state(pid) {
                    Some(CPublishFlightState::AwaitingPubcomp) => {
                        debug!("publication with packet identifier {} complete", pid);
                        self.session.remove_cpublish(pid);
                        (
                            Some(Event::PublishComplete {
                                packet_identifier: pid,
                            }),
                            0,
                        )
                    }
                    Some(_) => {
                        warn!("PUBCOMP for packet identifier {} not awaiting it", pid);
                        return Err(Error::UnexpectedPacket);
                    }
                    None => {
                        warn!("packet identifier {} in PUBCOMP not in use", pid);
                        (Some(Event::Ignored), 0)
                    }
                }
            }
            ControlPacket::Suback(suback) => {
                let pid = suback.packet_identifier;
                if Self::remove_packet_identifier_if_exists(&mut self.pending_suback, pid) {
                    (
                        Some(Event::Suback {
                            packet_identifier: pid,
                            return_codes: suback.return_codes.clone(),
                        }),
                        0,
                    )
                } else {
                    warn!("packet identifier {} in SUBACK not in use", pid);
                    (Some(Event::Ignored), 0)
                }
            }
            ControlPacket::Unsuback(unsuback) => {
                let pid = unsuback.packet_identifier;
                if Self::remove_packet_identifier_if_exists(&mut self.pending_unsuback, pid) {
                    (
                        Some(Event::Unsuback {
                            packet_identifier: pid,
                        }),
                        0,
                    )
                } else {
                    warn!("packet identifier {} in UNSUBACK not in use", pid);
                    (Some(Event::Ignored), 0)
                }
            }
            ControlPacket::Connack(_)
            | ControlPacket::Connect(_)
            | ControlPacket::Subscribe(_)
            | ControlPacket::Unsubscribe(_)
            | ControlPacket::Pingreq(_)
            | ControlPacket::Disconnect(_) => {
                warn!("received packet the server is not allowed to send here");
                return Err(Error::UnexpectedPacket);
            }
        };

        if reply_len > 0 {
            self.keep_alive.note_send(now_millis);
        }
        Ok(Response { event, reply_len })
    }

    fn handle_connack<'p, const MAX_TOPICS: usize>(
        &mut self,
        connack: &ConnackPacket,
    ) -> Result<Response<'p, MAX_TOPICS, MAX_MESSAGE_SIZE>, Error> {
        match connack.return_code {
            ConnectReturnCode::Accepted => {
                debug!("CONNACK packet indicates success");
                self.state = ConnectionState::Connected;
                Ok(Response {
                    event: Some(Event::Connected {
                        session_present: connack.session_present,
                    }),
                    reply_len: 0,
                })
            }
            code => {
                debug!("CONNACK packet indicates rejection");
                self.state = ConnectionState::Disconnected;
                Err(Error::ConnectionRefused(code))
            }
        }
    }

    fn handle_publish<'p, const MAX_TOPICS: usize>(
        &mut self,
        publish: &PublishPacket<'p>,
        reply: &mut [u8],
    ) -> Result<
        (
            Option<Event<'p, MAX_TOPICS, MAX_MESSAGE_SIZE>>,
            usize,
        ),
        Error,
    > {
        let message = Message {
            topic: publish.topic,
            payload: publish.payload,
            qos: publish.qos.qos(),
            dup: publish.dup,
            retain: publish.retain,
        };

        Ok(match publish.qos {
            IdentifiedQoS::AtMostOnce => {
                debug!("received QoS 0 publication");
                (Some(Event::Message(message)), 0)
            }
            IdentifiedQoS::AtLeastOnce(pid) => {
                debug!("received QoS 1 publication with packet identifier {}", pid);
                let len = PubackPacket::new(pid).encode(reply)?;
                (Some(Event::Message(message)), len)
            }
            IdentifiedQoS::ExactlyOnce(pid) => {
                debug!("received QoS 2 publication with packet identifier {}", pid);

                if self.session.is_used_spublish_packet_identifier(pid) {
                    // Retransmission of a message already withheld; do not
                    // deliver it a second time.
                    let len = PubrecPacket::new(pid).encode(reply)?;
                    return Ok((Some(Event::Duplicate), len));
                }

                let topic = String::try_from(publish.topic.as_str())
                    .map_err(|_| Error::SessionBuffer)?;
                let payload = Vec::from_slice(publish.payload).map_err(|_| Error::SessionBuffer)?;

                let len = PubrecPacket::new(pid).encode(reply)?;
                self.session
                    .track_spublish(
                        pid,
                        StoredMessage {
                            topic,
                            payload,
                            retain: publish.retain,
                        },
                    )
                    .map_err(|_| Error::SessionBuffer)?;

                // The message surfaces once the PUBREL arrives.
                (None, len)
            }
        })
    }
}
