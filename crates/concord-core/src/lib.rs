//! Core pipeline for the Concord governance simulator.
//!
//! This crate owns the round cycle that drives a session: sample every
//! agent's state, run the voting policy per agent, tally the votes,
//! aggregate the collective index, classify the decision, and append it
//! to the rolling history.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `concord-config.yaml` into
//!   strongly-typed structs, with fail-fast validation.
//! - [`sampler`] -- [`StateSampler`] trait and the uniform production
//!   sampler.
//! - [`aggregate`] -- Collective index aggregation (mean signal product).
//! - [`policy`] -- The three-tier per-agent voting policy.
//! - [`round`] -- One complete sample-vote-tally-aggregate round.
//! - [`classify`] -- Winner selection (deterministic tie-break) and
//!   quality labeling.
//! - [`history`] -- Bounded parallel sequences of past winners and
//!   collective-index values.
//! - [`session`] -- The tick-driven [`Session`] loop producing
//!   presentation snapshots.
//!
//! [`StateSampler`]: sampler::StateSampler
//! [`Session`]: session::Session

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod policy;
pub mod round;
pub mod sampler;
pub mod session;

pub use error::CoreError;
