//! Bounded decision history.
//!
//! Two parallel append-only sequences -- winning proposals and
//! collective-index values -- retained for display. Append is the only
//! mutator; all reads hand out copies, never references into the live
//! sequences. When a capacity is configured, appends beyond it drop the
//! oldest entry first (ring-buffer semantics), so the retained slice
//! always covers a contiguous, monotonically increasing run of round
//! indices.

use std::collections::VecDeque;

use concord_types::{DecisionRecord, HistoryWindow, Proposal};

use crate::error::CoreError;

/// Rolling store of past winners and collective-index values.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Maximum retained entries, or `None` for unbounded growth.
    capacity: Option<usize>,
    /// Round index of the oldest retained entry.
    first_round_index: u64,
    /// Winning proposal per retained round, oldest first.
    winners: VecDeque<Proposal>,
    /// Collective index per retained round, oldest first.
    collective_indices: VecDeque<f64>,
}

impl HistoryStore {
    /// Create an empty history store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if `capacity` is
    /// `Some(0)`: a zero-sized window could never retain anything.
    pub fn new(capacity: Option<usize>) -> Result<Self, CoreError> {
        if capacity == Some(0) {
            return Err(CoreError::InvalidConfiguration {
                reason: "history window must be at least 1 when bounded".to_owned(),
            });
        }
        Ok(Self {
            capacity,
            first_round_index: 0,
            winners: VecDeque::new(),
            collective_indices: VecDeque::new(),
        })
    }

    /// Append one decision record, evicting the oldest entry if the
    /// configured capacity is exceeded.
    pub fn append(&mut self, record: &DecisionRecord) {
        if self.winners.is_empty() {
            self.first_round_index = record.round_index;
        }
        self.winners.push_back(record.winning_proposal.clone());
        self.collective_indices.push_back(record.collective_index);

        if let Some(capacity) = self.capacity {
            while self.winners.len() > capacity {
                let _ = self.winners.pop_front();
                let _ = self.collective_indices.pop_front();
                self.first_round_index = self.first_round_index.saturating_add(1);
            }
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Round index of the oldest retained entry.
    pub const fn first_round_index(&self) -> u64 {
        self.first_round_index
    }

    /// The configured capacity, or `None` when unbounded.
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Copy out the last `n` retained entries (or all of them when `n`
    /// exceeds the retained length).
    pub fn window(&self, n: usize) -> HistoryWindow {
        let skip = self.winners.len().saturating_sub(n);
        let skipped_rounds = u64::try_from(skip).unwrap_or(u64::MAX);
        HistoryWindow {
            first_round_index: self.first_round_index.saturating_add(skipped_rounds),
            winners: self.winners.iter().skip(skip).cloned().collect(),
            collective_indices: self.collective_indices.iter().skip(skip).copied().collect(),
        }
    }

    /// Copy out the entire retained history.
    pub fn full_window(&self) -> HistoryWindow {
        self.window(self.winners.len())
    }
}
