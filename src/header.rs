use crate::{
    io::{BuffWriter, Error},
    types::VarByteInt,
};

/// The first byte of every control packet plus the remaining length that
/// follows it: `(packet type << 4) | flags` and 1-4 length bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedHeader {
    pub(crate) type_and_flags: u8,
    pub(crate) remaining_len: VarByteInt,
}

impl FixedHeader {
    pub(crate) fn new(packet_type: PacketType, flags: u8, remaining_len: VarByteInt) -> Self {
        Self {
            type_and_flags: (packet_type as u8) << 4 | flags,
            remaining_len,
        }
    }

    pub fn flags(&self) -> u8 {
        self.type_and_flags & 0x0F
    }

    pub fn packet_type(&self) -> Result<PacketType, Error> {
        PacketType::from_type_and_flags(self.type_and_flags)
    }

    pub fn remaining_len(&self) -> u32 {
        self.remaining_len.value()
    }

    pub(crate) fn write(&self, writer: &mut BuffWriter<'_>) -> Result<(), Error> {
        writer.write_u8(self.type_and_flags)?;
        writer.write_variable_byte_int(self.remaining_len)
    }
}

/// The control packet type stored in the upper nibble of the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketType {
    Connect = 1,
    Connack = 2,
    Publish = 3,
    Puback = 4,
    Pubrec = 5,
    Pubrel = 6,
    Pubcomp = 7,
    Subscribe = 8,
    Suback = 9,
    Unsubscribe = 10,
    Unsuback = 11,
    Pingreq = 12,
    Pingresp = 13,
    Disconnect = 14,
}

impl PacketType {
    /// Classifies the type nibble. The values 0 and 15 are reserved in
    /// MQTT 3.1.1 and decode as `MalformedFixedHeader`.
    pub fn from_type_and_flags(type_and_flags: u8) -> Result<Self, Error> {
        match type_and_flags >> 4 {
            1 => Ok(PacketType::Connect),
            2 => Ok(PacketType::Connack),
            3 => Ok(PacketType::Publish),
            4 => Ok(PacketType::Puback),
            5 => Ok(PacketType::Pubrec),
            6 => Ok(PacketType::Pubrel),
            7 => Ok(PacketType::Pubcomp),
            8 => Ok(PacketType::Subscribe),
            9 => Ok(PacketType::Suback),
            10 => Ok(PacketType::Unsubscribe),
            11 => Ok(PacketType::Unsuback),
            12 => Ok(PacketType::Pingreq),
            13 => Ok(PacketType::Pingresp),
            14 => Ok(PacketType::Disconnect),
            _ => Err(Error::MalformedFixedHeader),
        }
    }

    /// Validates the reserved flag bits for this packet type.
    ///
    /// PUBLISH carries dup/QoS/retain in its flags and is checked during body
    /// decoding; PUBREL, SUBSCRIBE and UNSUBSCRIBE require `0x02`; everything
    /// else requires `0x00`.
    pub(crate) fn validate_flags(self, flags: u8) -> Result<(), Error> {
        let expected = match self {
            PacketType::Publish => return Ok(()),
            PacketType::Pubrel | PacketType::Subscribe | PacketType::Unsubscribe => 0x02,
            _ => 0x00,
        };

        if flags != expected {
            return Err(Error::MalformedFixedHeader);
        }
        Ok(())
    }
}
