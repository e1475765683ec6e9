//! Trailing-edge debounce bookkeeping.
//!
//! Timers themselves live in the view (`gloo-timers`); this type only decides
//! whether a timer that just fired is still the latest one.

pub const SEARCH_DEBOUNCE_MS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub id: u64,
    pub due_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Debounce {
    delay_ms: u32,
    generation: u64,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Start a new quiet period, superseding any pending ticket.
    pub fn schedule(&mut self, now_ms: u64) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket {
            id: self.generation,
            due_at_ms: now_ms + u64::from(self.delay_ms),
        }
    }

    /// True when `ticket` is still the latest one; it is consumed either way.
    pub fn fire(&mut self, ticket: DebounceTicket) -> bool {
        if ticket.id != self.generation {
            return false;
        }
        self.generation += 1;
        true
    }

    /// Invalidate every outstanding ticket (new input elsewhere, teardown).
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_keystroke_fires() {
        let mut debounce = Debounce::new(SEARCH_DEBOUNCE_MS);
        let t0 = debounce.schedule(0);
        let t1 = debounce.schedule(100);
        let t2 = debounce.schedule(200);

        // Timers fire in due order.
        assert_eq!(t0.due_at_ms, 400);
        assert!(!debounce.fire(t0));
        assert_eq!(t1.due_at_ms, 500);
        assert!(!debounce.fire(t1));
        assert_eq!(t2.due_at_ms, 600);
        assert!(debounce.fire(t2));
    }

    #[test]
    fn a_ticket_fires_once() {
        let mut debounce = Debounce::new(10);
        let ticket = debounce.schedule(0);
        assert!(debounce.fire(ticket));
        assert!(!debounce.fire(ticket));
    }

    #[test]
    fn cancel_invalidates_pending_ticket() {
        let mut debounce = Debounce::new(10);
        let ticket = debounce.schedule(0);
        debounce.cancel();
        assert!(!debounce.fire(ticket));
    }
}
