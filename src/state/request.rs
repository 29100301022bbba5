/// Identifies one issued request within a [`RequestSeq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

/// Latest-wins request ordering.
///
/// Every new request takes a fresh ticket; a response may only be applied while
/// its ticket is still the most recent one. `invalidate` drops all in-flight
/// tickets without issuing a new request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket(self.latest)
    }

    pub fn invalidate(&mut self) {
        self.latest = self.latest.wrapping_add(1);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn current(&self) -> Ticket {
        Ticket(self.latest)
    }
}

/// Exponential retry delay for failed fetches. Reset on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Backoff {
    initial_ms: u32,
    max_ms: u32,
    max_attempts: u32,
    next_ms: u32,
    attempts: u32,
}

impl Backoff {
    pub const fn new(initial_ms: u32, max_ms: u32, max_attempts: u32) -> Self {
        Self {
            initial_ms,
            max_ms,
            max_attempts,
            next_ms: initial_ms,
            attempts: 0,
        }
    }

    /// Delay before the next attempt, or `None` once the attempt budget is spent.
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        let delay = self.next_ms;
        self.attempts += 1;
        self.next_ms = self.next_ms.saturating_mul(2).min(self.max_ms);
        Some(delay)
    }

    pub fn reset(&mut self) {
        self.next_ms = self.initial_ms;
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(500, 8_000, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut seq = RequestSeq::default();
        let a = seq.issue();
        let b = seq.issue();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
        assert!(b > a);
    }

    #[test]
    fn test_invalidate_drops_in_flight_ticket() {
        let mut seq = RequestSeq::default();
        let a = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(a));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut b = Backoff::new(500, 3_000, 5);
        let delays: Vec<u32> = std::iter::from_fn(|| b.next_delay()).collect();
        assert_eq!(delays, vec![500, 1_000, 2_000, 3_000, 3_000]);
        assert_eq!(b.next_delay(), None);
    }

    #[test]
    fn test_backoff_reset() {
        let mut b = Backoff::default();
        b.next_delay();
        b.next_delay();
        b.reset();
        assert_eq!(b.attempts(), 0);
        assert_eq!(b.next_delay(), Some(500));
    }
}
