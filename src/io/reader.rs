use core::str::from_utf8;

use crate::{
    io::Error,
    types::{MqttBinary, MqttString},
};

/// Cursor over a byte slice from which packet fields are read in sequence.
pub(crate) struct BuffReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> BuffReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let byte = *self
            .buffer
            .get(self.position)
            .ok_or(Error::InsufficientData)?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a 2-byte length prefix followed by that many bytes.
    pub fn read_binary(&mut self) -> Result<MqttBinary<'a>, Error> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_exact(len).map_err(|_| Error::MalformedString)?;
        Ok(MqttBinary::from_slice_unchecked(bytes))
    }

    /// Reads a 2-byte length prefix followed by that many bytes of UTF-8.
    pub fn read_string(&mut self) -> Result<MqttString<'a>, Error> {
        let binary = self.read_binary()?;
        from_utf8(binary.as_bytes()).map_err(|_| Error::MalformedString)?;
        Ok(MqttString(binary))
    }

    /// Consumes all bytes left in the buffer.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let rest = &self.buffer[self.position..];
        self.position = self.buffer.len();
        rest
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.position + len;
        if end > self.buffer.len() {
            return Err(Error::InsufficientData);
        }
        let bytes = &self.buffer[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}
