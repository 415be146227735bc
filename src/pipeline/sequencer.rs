//! Ticket Sequencer - per-category ticket ID counters
//!
//! Owned by the orchestrator. Counters start at 1 for every category and only
//! move through `next_id`, so a skipped record never consumes a number.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::TicketPrefixes;
use crate::types::Category;

/// Independent atomic counter per category
#[derive(Debug)]
pub struct TicketSequencer {
    prefixes: TicketPrefixes,
    counters: [AtomicU32; 5],
}

impl TicketSequencer {
    pub fn new(prefixes: TicketPrefixes) -> Self {
        Self {
            prefixes,
            counters: Default::default(),
        }
    }

    /// Claim the next identifier for `category`: `<PREFIX>-<4-digit sequence>`.
    pub fn next_id(&self, category: Category) -> String {
        let seq = self.counters[category.index()].fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{seq:04}", self.prefixes.for_category(category))
    }

    /// Number of identifiers issued so far for `category`.
    pub fn issued(&self, category: Category) -> u32 {
        self.counters[category.index()].load(Ordering::SeqCst)
    }

    /// Restart every counter at 1 (start of a new run).
    pub fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl Default for TicketSequencer {
    fn default() -> Self {
        Self::new(TicketPrefixes::default())
    }
}
