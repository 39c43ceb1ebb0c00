//! The simulation session: the tick-driven driver of the pipeline.
//!
//! A [`Session`] owns everything that persists across rounds -- the
//! agent roster, the proposal ordering, the sampler, the policy RNG, the
//! history store, and the round counter. Each [`tick`](Session::tick)
//! runs one complete round (sample -> vote -> tally -> aggregate),
//! classifies the result, appends it to history, and returns an
//! immutable [`TickSnapshot`] for the presentation layer.
//!
//! Ticks are single-threaded and run to completion; the only shared
//! mutable state across ticks is the history store, which external
//! readers observe exclusively through the copied-out snapshot, never
//! through references into the live sequences.

use chrono::Utc;
use concord_types::{AgentId, Proposal, SessionId, TickSnapshot};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::classify;
use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::history::HistoryStore;
use crate::round;
use crate::sampler::{StateSampler, UniformSampler};

/// One running simulation session.
///
/// Construction validates the configuration (fail fast on an empty or
/// duplicated proposal set, zero agents, or a zero-sized history
/// window); after that, every `tick` is infallible short of an injected
/// out-of-range state or round-counter exhaustion.
#[derive(Debug)]
pub struct Session<S: StateSampler> {
    /// Unique identifier for this session, carried in every snapshot.
    session_id: SessionId,
    /// The fixed agent roster, numbered `1..=N`.
    agents: Vec<AgentId>,
    /// The fixed, ordered proposal set.
    proposals: Vec<Proposal>,
    /// The source of per-agent states.
    sampler: S,
    /// Random stream for the policy's random tier, independent of the
    /// sampler's stream.
    policy_rng: SmallRng,
    /// Retained decision history.
    history: HistoryStore,
    /// Index the next round will carry.
    next_round_index: u64,
}

impl Session<UniformSampler<SmallRng>> {
    /// Create a session with the production uniform sampler.
    ///
    /// When `config.session.seed` is set, both random streams are
    /// derived from it and the whole run replays deterministically;
    /// otherwise they are seeded from the process-wide generator.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if the configuration
    /// fails validation.
    pub fn new(config: &SessionConfig) -> Result<Self, CoreError> {
        let mut seed_rng = match config.session.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let sampler_rng = SmallRng::seed_from_u64(seed_rng.next_u64());
        Self::with_sampler(config, UniformSampler::new(sampler_rng), &mut seed_rng)
    }
}

impl<S: StateSampler> Session<S> {
    /// Create a session with an injected sampler.
    ///
    /// `policy_seed_source` seeds the policy's random tier; tests pass a
    /// seeded RNG here for deterministic replay.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if the configuration
    /// fails validation.
    pub fn with_sampler(
        config: &SessionConfig,
        sampler: S,
        policy_seed_source: &mut impl RngCore,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let proposals = config
            .governance
            .proposals
            .iter()
            .map(|name| Proposal::new(name.clone()))
            .collect();

        Ok(Self {
            session_id: SessionId::new(),
            agents: AgentId::roster(config.governance.agent_count),
            proposals,
            sampler,
            policy_rng: SmallRng::seed_from_u64(policy_seed_source.next_u64()),
            history: HistoryStore::new(config.governance.history_window)?,
            next_round_index: 0,
        })
    }

    /// Run one complete round and return its snapshot.
    ///
    /// Runs to completion before returning; nothing in a round suspends
    /// or blocks on the presentation layer. The returned snapshot is a
    /// copy-out: it shares no mutable state with the session.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ValueOutOfRange`] if the sampler produces an
    /// out-of-range state, or [`CoreError::RoundOverflow`] if the round
    /// counter is exhausted.
    pub fn tick(&mut self) -> Result<TickSnapshot, CoreError> {
        let round_index = self.next_round_index;

        let outcome = round::run(
            &self.agents,
            &self.proposals,
            &mut self.sampler,
            &mut self.policy_rng,
        )?;

        let decision = classify::classify(
            round_index,
            &outcome.tally,
            &self.proposals,
            outcome.collective_index,
        )?;

        self.history.append(&decision);
        self.next_round_index = round_index
            .checked_add(1)
            .ok_or(CoreError::RoundOverflow)?;

        debug!(
            session_id = %self.session_id,
            round = round_index,
            winner = %decision.winning_proposal,
            quality = %decision.quality_label,
            collective_index = outcome.collective_index,
            "round classified"
        );

        Ok(TickSnapshot {
            session_id: self.session_id,
            round_index,
            states: outcome.states,
            tally: outcome.tally,
            collective_index: outcome.collective_index,
            decision,
            history: self.history.full_window(),
            generated_at: Utc::now(),
        })
    }

    /// This session's unique identifier.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The fixed agent roster.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// The fixed, ordered proposal set.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Number of rounds completed so far.
    pub const fn rounds_completed(&self) -> u64 {
        self.next_round_index
    }

    /// Read access to the retained history.
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }
}
