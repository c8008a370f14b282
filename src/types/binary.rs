use core::fmt;

use crate::io::Error;

/// Arbitrary binary data with a length that fits the 2-byte length prefix
/// used on the wire.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct MqttBinary<'b>(&'b [u8]);

impl<'b> fmt::Debug for MqttBinary<'b> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MqttBinary").field(&self.0).finish()
    }
}

#[cfg(feature = "defmt")]
impl<'b> defmt::Format for MqttBinary<'b> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MqttBinary({:?})", self.0);
    }
}

impl<'b> TryFrom<&'b [u8]> for MqttBinary<'b> {
    type Error = Error;

    fn try_from(value: &'b [u8]) -> Result<Self, Error> {
        if value.len() > Self::MAX_LENGTH {
            Err(Error::ValueOutOfRange)
        } else {
            Ok(Self(value))
        }
    }
}

impl<'b> AsRef<[u8]> for MqttBinary<'b> {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl<'b> MqttBinary<'b> {
    /// The maximum length in bytes, limited by the 2-byte length field.
    pub const MAX_LENGTH: usize = u16::MAX as usize;

    /// Wraps a slice whose length is already known to fit the length field.
    ///
    /// # Panics
    /// Panics in debug builds if the slice is longer than `MAX_LENGTH`.
    pub(crate) const fn from_slice_unchecked(slice: &'b [u8]) -> Self {
        debug_assert!(slice.len() <= Self::MAX_LENGTH);
        Self(slice)
    }

    /// Returns the length of the underlying data in bytes.
    #[inline]
    pub const fn len(&self) -> u16 {
        self.0.len() as u16
    }

    /// Returns whether the underlying data is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &'b [u8] {
        self.0
    }

    /// Length prefix plus data, as occupied on the wire.
    pub(crate) const fn encoded_len(&self) -> u32 {
        self.0.len() as u32 + 2
    }
}
