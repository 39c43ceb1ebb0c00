//! The voting policy: one agent's state mapped to one proposal.
//!
//! A fixed three-tier policy, evaluated in priority order (first match
//! wins):
//!
//! 1. `stress > 0.7` -- vote for the first proposal (the known,
//!    conservative option). High physiological stress biases toward the
//!    status quo.
//! 2. `focus > 0.6` -- vote for the second proposal (the moderate,
//!    logical option), falling back to the first when only one proposal
//!    exists.
//! 3. Otherwise -- vote for a proposal drawn uniformly at random from
//!    the full set.
//!
//! The two thresholds and the evaluation order are the entire policy;
//! swapping the order changes outcomes at the boundaries, so both are
//! fixed constants here.

use concord_types::{AgentState, Proposal};
use rand::Rng;

use crate::error::CoreError;

/// Stress level above which an agent always votes for the first proposal.
pub const HIGH_STRESS_THRESHOLD: f64 = 0.7;

/// Focus level above which a non-stressed agent votes for the second
/// proposal.
pub const HIGH_FOCUS_THRESHOLD: f64 = 0.6;

/// Decide one agent's vote from its sampled state.
///
/// The caller is responsible for supplying an in-range state; the voting
/// round validates states as it samples them. The random source is only
/// consumed when the third tier is reached.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfiguration`] if the proposal set is
/// empty. Session construction forbids that, so this is unreachable in
/// a running session.
pub fn decide<R: Rng>(
    state: &AgentState,
    proposals: &[Proposal],
    rng: &mut R,
) -> Result<Proposal, CoreError> {
    let first = proposals
        .first()
        .ok_or_else(|| CoreError::InvalidConfiguration {
            reason: "proposal set is empty".to_owned(),
        })?;

    // Tier 1: high stress votes conservative.
    if state.stress > HIGH_STRESS_THRESHOLD {
        return Ok(first.clone());
    }

    // Tier 2: focused agents vote for the moderate option, if one exists.
    if state.focus > HIGH_FOCUS_THRESHOLD {
        return Ok(proposals.get(1).unwrap_or(first).clone());
    }

    // Tier 3: uniform random draw over the full set.
    let idx = rng.random_range(0..proposals.len());
    Ok(proposals.get(idx).unwrap_or(first).clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn abc() -> Vec<Proposal> {
        vec![Proposal::from("A"), Proposal::from("B"), Proposal::from("C")]
    }

    #[test]
    fn high_stress_always_votes_first() {
        let proposals = abc();
        let mut rng = SmallRng::seed_from_u64(0);
        // Focus and coherence are irrelevant once stress crosses the
        // threshold.
        for focus in [0.0, 0.65, 1.0] {
            let state = AgentState::new(0.9, focus, 0.5);
            let vote = decide(&state, &proposals, &mut rng).unwrap();
            assert_eq!(vote, Proposal::from("A"));
        }
    }

    #[test]
    fn stress_at_threshold_is_not_high_stress() {
        // 0.7 is not strictly greater than 0.7; the focus tier applies.
        let proposals = abc();
        let mut rng = SmallRng::seed_from_u64(0);
        let state = AgentState::new(0.7, 0.8, 0.5);
        let vote = decide(&state, &proposals, &mut rng).unwrap();
        assert_eq!(vote, Proposal::from("B"));
    }

    #[test]
    fn focused_agent_votes_second() {
        let proposals = abc();
        let mut rng = SmallRng::seed_from_u64(0);
        let state = AgentState::new(0.1, 0.8, 0.2);
        let vote = decide(&state, &proposals, &mut rng).unwrap();
        assert_eq!(vote, Proposal::from("B"));
    }

    #[test]
    fn focus_at_threshold_falls_to_random_tier() {
        // 0.6 is not strictly greater than 0.6; the random tier applies.
        let proposals = abc();
        let state = AgentState::new(0.1, 0.6, 0.2);
        let mut seen = std::collections::BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let vote = decide(&state, &proposals, &mut rng).unwrap();
            let _ = seen.insert(vote);
        }
        // A uniform draw over three proposals visits more than one of
        // them in 200 attempts.
        assert!(seen.len() > 1);
    }

    #[test]
    fn focused_agent_falls_back_to_sole_proposal() {
        let proposals = vec![Proposal::from("Only")];
        let mut rng = SmallRng::seed_from_u64(0);
        let state = AgentState::new(0.1, 0.9, 0.2);
        let vote = decide(&state, &proposals, &mut rng).unwrap();
        assert_eq!(vote, Proposal::from("Only"));
    }

    #[test]
    fn random_tier_only_picks_configured_proposals() {
        let proposals = abc();
        let state = AgentState::new(0.2, 0.3, 0.4);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let vote = decide(&state, &proposals, &mut rng).unwrap();
            assert!(proposals.contains(&vote));
        }
    }

    #[test]
    fn stress_tier_beats_focus_tier() {
        // Both thresholds exceeded: stress wins because it is evaluated
        // first.
        let proposals = abc();
        let mut rng = SmallRng::seed_from_u64(0);
        let state = AgentState::new(0.8, 0.9, 0.9);
        let vote = decide(&state, &proposals, &mut rng).unwrap();
        assert_eq!(vote, Proposal::from("A"));
    }

    #[test]
    fn empty_proposal_set_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let state = AgentState::new(0.5, 0.5, 0.5);
        let result = decide(&state, &[], &mut rng);
        assert!(matches!(
            result,
            Err(CoreError::InvalidConfiguration { .. })
        ));
    }
}
