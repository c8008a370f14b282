use crate::{
    header::PacketType,
    io::{BuffReader, Error},
    packet::ControlPacket,
    types::VarByteInt,
};

/// Result of feeding bytes to a [`ReadContext`].
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseOutcome<'a, const MAX_TOPICS: usize> {
    /// The bytes seen so far do not yet form a whole packet. Feed more.
    NeedMoreData,
    /// One packet was reassembled and decoded. Bytes past it were not
    /// consumed and must be fed again.
    Complete(ControlPacket<'a, MAX_TOPICS>),
}

/// Incremental packet parser.
///
/// Bytes arrive in arbitrary fragments through [`ReadContext::feed`] and are
/// accumulated in an internal buffer of `BUF_SIZE` bytes until a whole packet
/// is present, at which point it is decoded and handed out. The packet
/// boundaries found this way never depend on how the input was fragmented.
///
/// A protocol error poisons the context: every later `feed` repeats the same
/// error until [`ReadContext::reset`] discards the accumulated state.
pub struct ReadContext<const BUF_SIZE: usize, const MAX_TOPICS: usize> {
    buffer: [u8; BUF_SIZE],
    len: usize,
    /// Set after handing out a packet; the buffer is recycled on the next
    /// `feed` so the returned borrow stays valid.
    completed: bool,
    poisoned: Option<Error>,
}

impl<const BUF_SIZE: usize, const MAX_TOPICS: usize> Default for ReadContext<BUF_SIZE, MAX_TOPICS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BUF_SIZE: usize, const MAX_TOPICS: usize> ReadContext<BUF_SIZE, MAX_TOPICS> {
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUF_SIZE],
            len: 0,
            completed: false,
            poisoned: None,
        }
    }

    /// Discards all accumulated bytes and clears a poisoned state.
    pub fn reset(&mut self) {
        self.len = 0;
        self.completed = false;
        self.poisoned = None;
    }

    /// Consumes bytes from `input` and reports how far parsing got.
    ///
    /// Returns the number of bytes consumed together with the outcome. Bytes
    /// belonging to a following packet are never consumed; the caller feeds
    /// the unconsumed tail again after handling the outcome.
    pub fn feed<'s>(
        &'s mut self,
        input: &[u8],
    ) -> Result<(usize, ParseOutcome<'s, MAX_TOPICS>), Error> {
        if let Some(err) = self.poisoned {
            return Err(err);
        }
        if self.completed {
            self.len = 0;
            self.completed = false;
        }

        let mut consumed = 0;
        let total = loop {
            match self.expected_total() {
                Ok(Some(total)) => {
                    if total > BUF_SIZE {
                        return Err(self.poison(Error::InsufficientBufferSize));
                    }
                    let take = (total - self.len).min(input.len() - consumed);
                    self.buffer[self.len..self.len + take]
                        .copy_from_slice(&input[consumed..consumed + take]);
                    self.len += take;
                    consumed += take;
                    if self.len == total {
                        break total;
                    }
                    return Ok((consumed, ParseOutcome::NeedMoreData));
                }
                // The fixed header is still incomplete. Take bytes one at a
                // time so none belonging to a later packet are consumed.
                Ok(None) => {
                    if consumed == input.len() {
                        return Ok((consumed, ParseOutcome::NeedMoreData));
                    }
                    if self.len == BUF_SIZE {
                        return Err(self.poison(Error::InsufficientBufferSize));
                    }
                    self.buffer[self.len] = input[consumed];
                    self.len += 1;
                    consumed += 1;
                }
                Err(e) => return Err(self.poison(e)),
            }
        };

        self.completed = true;
        // The decoded packet borrows the buffer for the caller, which blocks
        // poisoning afterwards. Check for errors with a short-lived decode
        // first; the second decode then cannot fail.
        let err = ControlPacket::<MAX_TOPICS>::decode(&self.buffer[..total]).err();
        if let Some(e) = err {
            return Err(self.poison(e));
        }
        let packet = match ControlPacket::decode(&self.buffer[..total]) {
            Ok(packet) => packet,
            Err(e) => return Err(e),
        };
        trace!("reassembled a {} byte packet", total);
        Ok((consumed, ParseOutcome::Complete(packet)))
    }

    /// Total packet length once the fixed header is complete, `None` while it
    /// is not.
    fn expected_total(&self) -> Result<Option<usize>, Error> {
        if self.len == 0 {
            return Ok(None);
        }
        // Reject a reserved type or bad flags on the very first byte, before
        // waiting for the rest of the header.
        let packet_type = PacketType::from_type_and_flags(self.buffer[0])?;
        packet_type.validate_flags(self.buffer[0] & 0x0F)?;

        let mut reader = BuffReader::new(&self.buffer[1..self.len]);
        let remaining_len = match VarByteInt::read(&mut reader) {
            Ok(len) => len,
            Err(Error::InsufficientData) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(1 + reader.position() + remaining_len.size()))
    }

    fn poison(&mut self, err: Error) -> Error {
        self.poisoned = Some(err);
        err
    }
}
