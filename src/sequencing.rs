// ABOUTME: Monotonic fetch tickets that let only the latest request on a channel commit its result
// ABOUTME: Guards session view state against slow responses overwriting newer ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed to one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Raw sequence number, starting at 1
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues tickets for one fetch channel (list or calendar)
///
/// A result may be committed only while its ticket is the most recent one
/// issued. Callers check [`FetchSequencer::is_current`] under the same lock
/// that guards the state being written.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: AtomicU64,
}

impl FetchSequencer {
    /// Create a sequencer with no tickets issued
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue the next ticket, superseding all earlier ones
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the latest issued
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let sequencer = FetchSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert_eq!(second.sequence(), 2);
    }
}
