use crate::io::Error;

/// MQTT's Quality of Service.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QoS {
    /// Level 0. Publications with this level are only sent once.
    AtMostOnce = 0,
    /// Level 1. Publications with this level are resent until a PUBACK
    /// confirms reception.
    AtLeastOnce = 1,
    /// Level 2. Publications with this level complete a four-way handshake
    /// assuring exactly-once reception.
    ExactlyOnce = 2,
}

impl QoS {
    pub(crate) const fn into_bits(self, left_shift: u8) -> u8 {
        let bits = match self {
            Self::AtMostOnce => 0x00,
            Self::AtLeastOnce => 0x01,
            Self::ExactlyOnce => 0x02,
        };

        bits << left_shift
    }

    pub(crate) fn try_from_bits(bits: u8) -> Result<Self, Error> {
        match bits {
            0x00 => Ok(Self::AtMostOnce),
            0x01 => Ok(Self::AtLeastOnce),
            0x02 => Ok(Self::ExactlyOnce),
            _ => Err(Error::MalformedPacket),
        }
    }
}

impl From<IdentifiedQoS> for QoS {
    fn from(value: IdentifiedQoS) -> Self {
        match value {
            IdentifiedQoS::AtMostOnce => Self::AtMostOnce,
            IdentifiedQoS::AtLeastOnce(_) => Self::AtLeastOnce,
            IdentifiedQoS::ExactlyOnce(_) => Self::ExactlyOnce,
        }
    }
}

/// Quality of Service of a PUBLISH packet, carrying the packet identifier
/// for levels greater than 0 which require one on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdentifiedQoS {
    /// Level 0. The PUBLISH packet does not contain a packet identifier.
    AtMostOnce,
    /// Level 1 with the non-zero packet identifier of the PUBLISH packet.
    AtLeastOnce(u16),
    /// Level 2 with the non-zero packet identifier of the PUBLISH packet.
    ExactlyOnce(u16),
}

impl IdentifiedQoS {
    /// Returns `Some(packet_identifier)` for levels 1 and 2 and `None` for
    /// level 0.
    #[inline]
    pub fn packet_identifier(&self) -> Option<u16> {
        match self {
            Self::AtMostOnce => None,
            Self::AtLeastOnce(pid) => Some(*pid),
            Self::ExactlyOnce(pid) => Some(*pid),
        }
    }

    pub(crate) fn qos(&self) -> QoS {
        QoS::from(*self)
    }
}
