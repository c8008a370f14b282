use crate::{
    io::Error,
    types::{MqttBinary, MqttString, VarByteInt},
};

/// Cursor over a mutable byte slice into which packet fields are written in
/// sequence. Every write fails with `InsufficientBufferSize` when the slice
/// runs out of room.
pub(crate) struct BuffWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> BuffWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn write_u8(&mut self, byte: u8) -> Result<(), Error> {
        let slot = self
            .buffer
            .get_mut(self.position)
            .ok_or(Error::InsufficientBufferSize)?;
        *slot = byte;
        self.position += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), Error> {
        self.write_slice(&value.to_be_bytes())
    }

    pub fn write_variable_byte_int(&mut self, value: VarByteInt) -> Result<(), Error> {
        value.write(self)
    }

    /// Writes a 2-byte length prefix followed by the data.
    pub fn write_binary(&mut self, binary: MqttBinary<'_>) -> Result<(), Error> {
        self.write_u16(binary.len())?;
        self.write_slice(binary.as_bytes())
    }

    /// Writes a 2-byte length prefix followed by the UTF-8 bytes.
    pub fn write_string(&mut self, string: MqttString<'_>) -> Result<(), Error> {
        self.write_u16(string.len())?;
        self.write_slice(string.as_str().as_bytes())
    }

    pub fn write_slice(&mut self, slice: &[u8]) -> Result<(), Error> {
        let end = self.position + slice.len();
        if end > self.buffer.len() {
            return Err(Error::InsufficientBufferSize);
        }
        self.buffer[self.position..end].copy_from_slice(slice);
        self.position = end;
        Ok(())
    }
}
