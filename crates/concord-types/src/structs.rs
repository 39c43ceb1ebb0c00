//! Core data structures for the Concord governance simulator.
//!
//! Everything here is plain data: the pipeline in `concord-core` produces
//! these values and the presentation layer consumes them read-only. The
//! shapes are exported to `TypeScript` via `ts-rs` for the dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::QualityLabel;
use crate::ids::{AgentId, SessionId};

// ---------------------------------------------------------------------------
// AgentState
// ---------------------------------------------------------------------------

/// Instantaneous cognitive state of one agent, sampled fresh each round.
///
/// All three signals are in `[0, 1]`. A state is never mutated after
/// creation; it is owned by the round that sampled it and survives only
/// in aggregates and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentState {
    /// Physiological stress level (0 = relaxed, 1 = maximal stress).
    pub stress: f64,
    /// Attentional focus level (0 = scattered, 1 = fully focused).
    pub focus: f64,
    /// Signal coherence level (0 = noisy, 1 = perfectly coherent).
    pub coherence: f64,
}

impl AgentState {
    /// Create a state from raw signal values. No range check is performed
    /// here; callers that accept externally produced states validate via
    /// [`Self::range_violation`] before folding them into aggregates.
    pub const fn new(stress: f64, focus: f64, coherence: f64) -> Self {
        Self {
            stress,
            focus,
            coherence,
        }
    }

    /// The per-agent scalar folded into the collective index:
    /// `focus * coherence * (1 - stress)`.
    ///
    /// For in-range inputs the product is itself in `[0, 1]`.
    pub const fn signal_product(&self) -> f64 {
        self.focus * self.coherence * (1.0 - self.stress)
    }

    /// Return the first field outside `[0, 1]` as `(name, value)`, or
    /// `None` if the state is well-formed. `NaN` counts as out of range.
    pub fn range_violation(&self) -> Option<(&'static str, f64)> {
        let fields = [
            ("stress", self.stress),
            ("focus", self.focus),
            ("coherence", self.coherence),
        ];
        fields
            .into_iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}

// ---------------------------------------------------------------------------
// Proposal
// ---------------------------------------------------------------------------

/// One of the fixed, ordered, named options being voted on.
///
/// The proposal set is constant for a session; ordering is significant
/// (it drives both the conservative/moderate policy tiers and the
/// deterministic tie-break).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Proposal(pub String);

impl Proposal {
    /// Create a proposal from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the proposal name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Display for Proposal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Proposal {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

// ---------------------------------------------------------------------------
// VoteTally
// ---------------------------------------------------------------------------

/// Vote counts for one round, keyed by the full proposal set.
///
/// A tally is zero-initialized over every configured proposal, so
/// proposals with no votes still appear with a count of 0. The sum of all
/// counts equals the number of agents that voted in the round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VoteTally {
    /// Per-proposal vote counts.
    counts: BTreeMap<Proposal, u32>,
}

impl VoteTally {
    /// Create a tally with a zero count for every proposal in the set.
    pub fn zeroed(proposals: &[Proposal]) -> Self {
        Self {
            counts: proposals.iter().cloned().map(|p| (p, 0)).collect(),
        }
    }

    /// Record one vote for `proposal`.
    ///
    /// Returns `false` if the proposal is not part of the configured set;
    /// the key set is fixed at construction and never grows.
    pub fn record_vote(&mut self, proposal: &Proposal) -> bool {
        match self.counts.get_mut(proposal) {
            Some(count) => {
                *count = count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Return the vote count for a proposal, or `None` if it is not in
    /// the configured set.
    pub fn count_for(&self, proposal: &Proposal) -> Option<u32> {
        self.counts.get(proposal).copied()
    }

    /// Total number of votes recorded across all proposals.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0_u64, |acc, &count| acc.saturating_add(u64::from(count)))
    }

    /// Iterate over `(proposal, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Proposal, u32)> {
        self.counts.iter().map(|(p, &c)| (p, c))
    }

    /// Number of proposals in the tally.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the tally holds no proposals at all.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DecisionRecord
// ---------------------------------------------------------------------------

/// The classified outcome of one voting round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DecisionRecord {
    /// Zero-based index of the round this decision belongs to.
    pub round_index: u64,
    /// The proposal with the greatest tally (ties broken by proposal order).
    pub winning_proposal: Proposal,
    /// Qualitative classification of the round.
    pub quality_label: QualityLabel,
    /// The collective index the classification was derived from.
    pub collective_index: f64,
}

// ---------------------------------------------------------------------------
// HistoryWindow
// ---------------------------------------------------------------------------

/// A read-only copy of the retained decision history.
///
/// `winners` and `collective_indices` are parallel sequences of equal
/// length; entry `i` of each belongs to round
/// `first_round_index + i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoryWindow {
    /// Round index of the oldest retained entry.
    pub first_round_index: u64,
    /// Winning proposal per retained round, oldest first.
    pub winners: Vec<Proposal>,
    /// Collective index per retained round, oldest first.
    pub collective_indices: Vec<f64>,
}

impl HistoryWindow {
    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    /// Whether the window holds no entries.
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TickSnapshot
// ---------------------------------------------------------------------------

/// Immutable copy-out of one completed tick, handed to the presentation
/// layer.
///
/// The snapshot shares no mutable state with the session that produced
/// it; the presentation layer may hold it for as long as it likes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickSnapshot {
    /// The session this tick belongs to.
    pub session_id: SessionId,
    /// Zero-based index of the round that just completed.
    pub round_index: u64,
    /// The state sampled for each agent this round.
    pub states: BTreeMap<AgentId, AgentState>,
    /// Vote counts over the full proposal set.
    pub tally: VoteTally,
    /// Mean `focus * coherence * (1 - stress)` across all agents.
    pub collective_index: f64,
    /// The classified decision for this round.
    pub decision: DecisionRecord,
    /// The retained history after this round was appended.
    pub history: HistoryWindow,
    /// Wall-clock time the snapshot was assembled.
    pub generated_at: DateTime<Utc>,
}
