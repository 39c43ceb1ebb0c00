//! Decision classification: winner selection and quality labeling.
//!
//! The winner is the proposal with the greatest tally. Ties are broken
//! deterministically by taking the first tied proposal in the fixed
//! proposal ordering -- an arbitrary "max key" pick would make outcomes
//! depend on incidental iteration order, which is unacceptable for
//! reproducible runs.

use concord_types::{DecisionRecord, Proposal, QualityLabel, VoteTally};

use crate::error::CoreError;

/// Collective index above which a round is labeled excellent.
pub const EXCELLENT_THRESHOLD: f64 = 0.7;

/// Collective index above which (up to the excellent threshold) a round
/// is labeled good.
pub const GOOD_THRESHOLD: f64 = 0.5;

/// Map a collective index to its quality label.
///
/// Thresholds, evaluated in order: `> 0.7` excellent, `> 0.5` good,
/// otherwise conservative.
pub fn quality_label(collective_index: f64) -> QualityLabel {
    if collective_index > EXCELLENT_THRESHOLD {
        QualityLabel::Excellent
    } else if collective_index > GOOD_THRESHOLD {
        QualityLabel::Good
    } else {
        QualityLabel::Conservative
    }
}

/// Classify one round's tally into a [`DecisionRecord`].
///
/// `proposals` must be the session's fixed proposal ordering; it drives
/// the tie-break. Proposals missing from the tally count as zero votes,
/// so an all-zero tally (a zero-agent round) deterministically elects the
/// first proposal.
///
/// The function is total and deterministic: the same `(tally,
/// collective_index)` input always yields the same record.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfiguration`] if `proposals` is empty.
pub fn classify(
    round_index: u64,
    tally: &VoteTally,
    proposals: &[Proposal],
    collective_index: f64,
) -> Result<DecisionRecord, CoreError> {
    let mut best: Option<(&Proposal, u32)> = None;
    for proposal in proposals {
        let count = tally.count_for(proposal).unwrap_or(0);
        // Strictly-greater keeps the earliest proposal on ties.
        let beats = best.is_none_or(|(_, best_count)| count > best_count);
        if beats {
            best = Some((proposal, count));
        }
    }

    let (winning_proposal, _) =
        best.ok_or_else(|| CoreError::InvalidConfiguration {
            reason: "proposal set is empty".to_owned(),
        })?;

    Ok(DecisionRecord {
        round_index,
        winning_proposal: winning_proposal.clone(),
        quality_label: quality_label(collective_index),
        collective_index,
    })
}
