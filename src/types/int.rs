use crate::io::{BuffReader, BuffWriter, Error};

/// MQTT's variable byte integer encoding, used for the remaining length field
/// of every fixed header.
///
/// Use the `TryFrom<u32>`, `From<u16>` and `From<u8>` implementations to
/// construct a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VarByteInt(u32);

impl VarByteInt {
    /// The maximum encodable value according to
    /// <https://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html#_Toc398718023>.
    pub const MAX_ENCODABLE: u32 = 268_435_455;

    /// Returns the inner value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns `Self::value() as usize`.
    pub const fn size(&self) -> usize {
        self.0 as usize
    }

    /// Returns how many bytes the encoding of this value occupies.
    pub const fn encoded_len(&self) -> usize {
        match self.0 {
            0..=127 => 1,
            128..=16_383 => 2,
            16_384..=2_097_151 => 3,
            _ => 4,
        }
    }

    /// Writes the minimal continuation-bit encoding.
    ///
    /// Follows the encoding pseudo code of the OASIS standard: 7 data bits
    /// per byte, bit 7 marking a continuation byte.
    pub(crate) fn write(&self, writer: &mut BuffWriter<'_>) -> Result<(), Error> {
        let mut x = self.0;

        loop {
            let mut encoded_byte = (x % 128) as u8;
            x /= 128;
            if x > 0 {
                encoded_byte |= 0x80;
            }
            writer.write_u8(encoded_byte)?;
            if x == 0 {
                return Ok(());
            }
        }
    }

    /// Reads a variable byte integer, stopping at the first byte without the
    /// continuation bit.
    ///
    /// Fails with `MalformedRemainingLength` if a 4th byte still carries the
    /// continuation bit or if the encoding is not minimal, and with
    /// `InsufficientData` if the reader runs dry before a terminating byte
    /// appears.
    pub(crate) fn read(reader: &mut BuffReader<'_>) -> Result<Self, Error> {
        let mut multiplier: u32 = 1;
        let mut value: u32 = 0;

        for i in 0..4 {
            let byte = reader.read_u8()?;
            value += (byte & 0x7F) as u32 * multiplier;
            multiplier *= 128;

            if byte & 0x80 == 0 {
                // Reject non-minimal encodings such as [0x80, 0x00].
                if i > 0 && byte == 0 {
                    return Err(Error::MalformedRemainingLength);
                }
                return Ok(Self(value));
            }
        }

        Err(Error::MalformedRemainingLength)
    }
}

impl TryFrom<u32> for VarByteInt {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        if value > Self::MAX_ENCODABLE {
            Err(Error::ValueOutOfRange)
        } else {
            Ok(Self(value))
        }
    }
}

impl From<u16> for VarByteInt {
    fn from(value: u16) -> Self {
        Self(value as u32)
    }
}

impl From<u8> for VarByteInt {
    fn from(value: u8) -> Self {
        Self(value as u32)
    }
}
