use core::{fmt, str::from_utf8_unchecked};

use crate::{io::Error, types::MqttBinary};

/// UTF-8 encoded string with a length in bytes that fits the 2-byte length
/// prefix used on the wire.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct MqttString<'s>(pub(crate) MqttBinary<'s>);

impl<'s> fmt::Debug for MqttString<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MqttString").field(&self.as_str()).finish()
    }
}

#[cfg(feature = "defmt")]
impl<'s> defmt::Format for MqttString<'s> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MqttString({:?})", self.as_str());
    }
}

impl<'s> TryFrom<&'s str> for MqttString<'s> {
    type Error = Error;

    fn try_from(value: &'s str) -> Result<Self, Error> {
        Self::from_str(value)
    }
}

impl<'s> AsRef<str> for MqttString<'s> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'s> MqttString<'s> {
    /// The maximum length of a string in bytes, limited by the 2-byte length
    /// field.
    pub const MAX_LENGTH: usize = MqttBinary::MAX_LENGTH;

    /// Converts a string slice, checking the maximum length.
    pub const fn from_str(s: &'s str) -> Result<Self, Error> {
        match s.len() {
            ..=Self::MAX_LENGTH => Ok(Self(MqttBinary::from_slice_unchecked(s.as_bytes()))),
            _ => Err(Error::ValueOutOfRange),
        }
    }

    /// Returns the length of the underlying data in bytes.
    #[inline]
    pub const fn len(&self) -> u16 {
        self.0.len()
    }

    /// Returns whether the underlying data is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying string.
    #[inline]
    pub const fn as_str(&self) -> &'s str {
        // Safety: MqttString contains valid UTF-8
        unsafe { from_utf8_unchecked(self.0.as_bytes()) }
    }

    /// Length prefix plus data, as occupied on the wire.
    pub(crate) const fn encoded_len(&self) -> u32 {
        self.0.encoded_len()
    }
}
