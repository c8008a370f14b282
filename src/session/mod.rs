//! Contains utilities for session management.

use heapless::Vec;

mod flight;

pub use flight::{CPublishFlightState, InFlightPublish, ReceivedPublish, StoredMessage};

/// Session-associated tracking of incomplete publication handshakes.
///
/// `MAX_IN_FLIGHT` bounds the in-flight publications per direction and
/// `MAX_MESSAGE_SIZE` the topic and payload of a withheld QoS 2 message.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session<const MAX_IN_FLIGHT: usize, const MAX_MESSAGE_SIZE: usize> {
    /// The currently in-flight outgoing publications.
    pub(crate) pending_client_publishes: Vec<InFlightPublish, MAX_IN_FLIGHT>,
    /// The currently in-flight incoming QoS 2 publications.
    pub(crate) pending_server_publishes: Vec<ReceivedPublish<MAX_MESSAGE_SIZE>, MAX_IN_FLIGHT>,
}

impl<const MAX_IN_FLIGHT: usize, const MAX_MESSAGE_SIZE: usize>
    Session<MAX_IN_FLIGHT, MAX_MESSAGE_SIZE>
{
    /// Returns whether the packet identifier is currently in-flight in a
    /// client->server publication process.
    pub fn is_used_cpublish_packet_identifier(&self, packet_identifier: u16) -> bool {
        self.cpublish_flight_state(packet_identifier).is_some()
    }

    /// Returns whether the packet identifier is currently in-flight in a
    /// server->client publication process.
    pub fn is_used_spublish_packet_identifier(&self, packet_identifier: u16) -> bool {
        self.pending_server_publishes
            .iter()
            .any(|f| f.packet_identifier == packet_identifier)
    }

    /// Returns the state of the outgoing publication under the packet
    /// identifier if one is in-flight.
    pub fn cpublish_flight_state(&self, packet_identifier: u16) -> Option<CPublishFlightState> {
        self.pending_client_publishes
            .iter()
            .find(|f| f.packet_identifier == packet_identifier)
            .map(|f| f.state)
    }

    /// Returns the amount of currently in-flight outgoing publications.
    pub fn in_flight_cpublishes(&self) -> usize {
        self.pending_client_publishes.len()
    }

    /// Returns the amount of currently in-flight incoming publications.
    pub fn in_flight_spublishes(&self) -> usize {
        self.pending_server_publishes.len()
    }

    /// Adds an entry awaiting the given acknowledgement. Fails when all
    /// `MAX_IN_FLIGHT` slots are taken.
    pub(crate) fn track_cpublish(
        &mut self,
        packet_identifier: u16,
        state: CPublishFlightState,
    ) -> Result<(), ()> {
        self.pending_client_publishes
            .push(InFlightPublish {
                packet_identifier,
                state,
            })
            .map_err(|_| ())
    }

    /// Withholds a received QoS 2 message until its PUBREL arrives. Fails
    /// when all `MAX_IN_FLIGHT` slots are taken.
    pub(crate) fn track_spublish(
        &mut self,
        packet_identifier: u16,
        message: StoredMessage<MAX_MESSAGE_SIZE>,
    ) -> Result<(), ()> {
        self.pending_server_publishes
            .push(ReceivedPublish {
                packet_identifier,
                message,
            })
            .map_err(|_| ())
    }

    /// Moves an in-flight outgoing publication to the given state. No-op for
    /// an identifier that is not in flight.
    pub(crate) fn advance_cpublish(&mut self, packet_identifier: u16, state: CPublishFlightState) {
        if let Some(flight) = self
            .pending_client_publishes
            .iter_mut()
            .find(|f| f.packet_identifier == packet_identifier)
        {
            flight.state = state;
        }
    }

    pub(crate) fn remove_cpublish(
        &mut self,
        packet_identifier: u16,
    ) -> Option<CPublishFlightState> {
        self.pending_client_publishes
            .iter()
            .position(|s| s.packet_identifier == packet_identifier)
            .map(|i| self.pending_client_publishes.swap_remove(i).state)
    }

    /// Releases a withheld QoS 2 message, handing out ownership.
    pub(crate) fn remove_spublish(
        &mut self,
        packet_identifier: u16,
    ) -> Option<StoredMessage<MAX_MESSAGE_SIZE>> {
        self.pending_server_publishes
            .iter()
            .position(|s| s.packet_identifier == packet_identifier)
            .map(|i| self.pending_server_publishes.swap_remove(i).message)
    }

    /// Packet identifiers of all outgoing publications awaiting a PUBCOMP.
    pub(crate) fn pending_releases(&self) -> impl Iterator<Item = u16> + '_ {
        self.pending_client_publishes
            .iter()
            .filter(|s| s.state == CPublishFlightState::AwaitingPubcomp)
            .map(|s| s.packet_identifier)
    }

    pub(crate) fn clear(&mut self) {
        self.pending_client_publishes.clear();
        self.pending_server_publishes.clear();
    }
}
