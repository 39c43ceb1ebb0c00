//! One complete voting round: sample, vote, tally, aggregate.
//!
//! For each agent the round samples a fresh state, range-checks it, and
//! runs the voting policy; the collective index is computed over the
//! collected states afterward. No agent's vote depends on any other
//! agent's state or vote, so iteration order cannot affect the result --
//! sequential execution here is an implementation choice, not a
//! requirement of the model.

use std::collections::BTreeMap;

use concord_types::{AgentId, AgentState, Proposal, VoteTally};
use rand::Rng;
use tracing::trace;

use crate::aggregate;
use crate::error::CoreError;
use crate::policy;
use crate::sampler::StateSampler;

/// Everything one round produces before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// The state sampled for each agent.
    pub states: BTreeMap<AgentId, AgentState>,
    /// Vote counts over the full proposal set; sums to the agent count.
    pub tally: VoteTally,
    /// Mean signal product across the sampled states (0 when no agents).
    pub collective_index: f64,
}

/// Run one voting round over the given agents and proposals.
///
/// The tally starts zero-initialized over the full proposal set, so an
/// empty agent roster yields an all-zero tally and a collective index of
/// 0 rather than an error.
///
/// # Errors
///
/// Returns [`CoreError::ValueOutOfRange`] if the sampler produces a
/// state with a signal outside `[0, 1]`, or
/// [`CoreError::InvalidConfiguration`] if the proposal set is empty.
pub fn run<S, R>(
    agents: &[AgentId],
    proposals: &[Proposal],
    sampler: &mut S,
    rng: &mut R,
) -> Result<RoundOutcome, CoreError>
where
    S: StateSampler,
    R: Rng,
{
    let mut states = BTreeMap::new();
    let mut tally = VoteTally::zeroed(proposals);

    for &agent_id in agents {
        let state = sampler.sample();
        // Reject injected out-of-range signals before they can reach the
        // policy or the aggregate mean.
        if let Some((field, value)) = state.range_violation() {
            return Err(CoreError::ValueOutOfRange { field, value });
        }

        let vote = policy::decide(&state, proposals, rng)?;
        trace!(agent = %agent_id, vote = %vote, "vote recorded");
        // The vote came out of the proposal set, so recording cannot miss.
        let _ = tally.record_vote(&vote);
        states.insert(agent_id, state);
    }

    let collective_index = aggregate::collective_index(states.values())?;

    Ok(RoundOutcome {
        states,
        tally,
        collective_index,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::sampler::UniformSampler;

    use super::*;

    /// A sampler that replays a fixed list of states, cycling when
    /// exhausted.
    struct ScriptedSampler {
        states: Vec<AgentState>,
        next: usize,
    }

    impl ScriptedSampler {
        fn new(states: Vec<AgentState>) -> Self {
            Self { states, next: 0 }
        }
    }

    impl StateSampler for ScriptedSampler {
        fn sample(&mut self) -> AgentState {
            let state = self
                .states
                .get(self.next % self.states.len().max(1))
                .copied()
                .unwrap_or(AgentState::new(0.5, 0.5, 0.5));
            self.next = self.next.wrapping_add(1);
            state
        }
    }

    fn abc() -> Vec<Proposal> {
        vec![Proposal::from("A"), Proposal::from("B"), Proposal::from("C")]
    }

    #[test]
    fn tally_sum_equals_agent_count() {
        let agents = AgentId::roster(17);
        let proposals = abc();
        let mut sampler = UniformSampler::new(SmallRng::seed_from_u64(5));
        let mut rng = SmallRng::seed_from_u64(6);

        let outcome = run(&agents, &proposals, &mut sampler, &mut rng).unwrap();
        assert_eq!(outcome.tally.total(), 17);
        assert_eq!(outcome.states.len(), 17);
    }

    #[test]
    fn empty_roster_yields_zero_tally_and_zero_index() {
        let proposals = abc();
        let mut sampler = UniformSampler::new(SmallRng::seed_from_u64(5));
        let mut rng = SmallRng::seed_from_u64(6);

        let outcome = run(&[], &proposals, &mut sampler, &mut rng).unwrap();
        assert_eq!(outcome.tally.total(), 0);
        assert_eq!(outcome.tally.len(), 3);
        assert_eq!(outcome.collective_index, 0.0);
        assert!(outcome.states.is_empty());
    }

    #[test]
    fn all_stressed_agents_vote_for_first_proposal() {
        let agents = AgentId::roster(5);
        let proposals = abc();
        let mut sampler =
            ScriptedSampler::new(vec![AgentState::new(0.9, 0.5, 0.5)]);
        let mut rng = SmallRng::seed_from_u64(0);

        let outcome = run(&agents, &proposals, &mut sampler, &mut rng).unwrap();
        assert_eq!(outcome.tally.count_for(&Proposal::from("A")), Some(5));
        assert_eq!(outcome.tally.count_for(&Proposal::from("B")), Some(0));
        assert_eq!(outcome.tally.count_for(&Proposal::from("C")), Some(0));
    }

    #[test]
    fn out_of_range_sampler_state_fails_the_round() {
        let agents = AgentId::roster(2);
        let proposals = abc();
        let mut sampler =
            ScriptedSampler::new(vec![AgentState::new(-0.1, 0.5, 0.5)]);
        let mut rng = SmallRng::seed_from_u64(0);

        let result = run(&agents, &proposals, &mut sampler, &mut rng);
        assert!(matches!(
            result,
            Err(CoreError::ValueOutOfRange { field: "stress", .. })
        ));
    }

    #[test]
    fn collective_index_matches_aggregate_of_states() {
        let agents = AgentId::roster(8);
        let proposals = abc();
        let mut sampler = UniformSampler::new(SmallRng::seed_from_u64(21));
        let mut rng = SmallRng::seed_from_u64(22);

        let outcome = run(&agents, &proposals, &mut sampler, &mut rng).unwrap();
        let recomputed =
            aggregate::collective_index(outcome.states.values()).unwrap();
        assert_eq!(outcome.collective_index, recomputed);
        assert!((0.0..=1.0).contains(&outcome.collective_index));
    }
}
