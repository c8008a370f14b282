/// Tracks the keep alive obligation of the connection.
///
/// The interval restarts with every packet the client sends. Once it elapses
/// without traffic, a PINGREQ is due; if the matching PINGRESP does not
/// arrive within another interval, the connection counts as dead.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct KeepAlive {
    /// Zero disables the mechanism entirely.
    interval_ms: u64,
    last_send: u64,
    /// Deadline for the PINGRESP of an outstanding PINGREQ.
    pong_deadline: Option<u64>,
}

impl KeepAlive {
    pub const fn new(interval_seconds: u16, now_millis: u64) -> Self {
        Self {
            interval_ms: interval_seconds as u64 * 1000,
            last_send: now_millis,
            pong_deadline: None,
        }
    }

    /// Restarts the interval. Called for every packet the client sends.
    pub fn note_send(&mut self, now_millis: u64) {
        self.last_send = now_millis;
    }

    /// Notes the sent PINGREQ and arms the response deadline.
    pub fn note_ping(&mut self, now_millis: u64) {
        self.pong_deadline = Some(now_millis + self.interval_ms);
        self.last_send = now_millis;
    }

    /// Completes an outstanding probe.
    pub fn note_pong(&mut self) {
        self.pong_deadline = None;
    }

    /// Whether a PINGREQ should be sent now.
    pub fn needs_ping(&self, now_millis: u64) -> bool {
        self.interval_ms != 0
            && self.pong_deadline.is_none()
            && now_millis.saturating_sub(self.last_send) >= self.interval_ms
    }

    /// Whether an outstanding probe went unanswered past its deadline.
    pub fn timed_out(&self, now_millis: u64) -> bool {
        match self.pong_deadline {
            Some(deadline) => now_millis >= deadline,
            None => false,
        }
    }
}
