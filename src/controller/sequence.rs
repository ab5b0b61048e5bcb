use crate::{MapError, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one request within its family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic request numbering; only the latest ticket may render
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, making every earlier ticket stale
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest()
    }

    pub fn check(&self, ticket: Ticket) -> Result<()> {
        if self.is_current(ticket) {
            return Ok(());
        }
        Err(MapError::Superseded {
            ticket: ticket.0,
            latest: self.latest(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let sequence = RequestSequence::new();
        let first = sequence.issue();
        assert!(sequence.is_current(first));

        let second = sequence.issue();
        assert!(second > first);
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert_eq!(sequence.latest(), 2);

        match sequence.check(first) {
            Err(MapError::Superseded { ticket, latest }) => {
                assert_eq!(ticket, 1);
                assert_eq!(latest, 2);
            }
            other => panic!("expected superseded, got {:?}", other),
        }
        assert!(sequence.check(second).is_ok());
    }
}
