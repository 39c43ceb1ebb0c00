//! Shared type definitions for the Concord governance simulator.
//!
//! This crate is the single source of truth for the data model that flows
//! through the sampling -> aggregation -> voting -> classification
//! pipeline. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the presentation dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers for sessions and agents
//! - [`enums`] -- Enumeration types (decision quality labels)
//! - [`structs`] -- Agent states, proposals, tallies, decisions, snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::QualityLabel;
pub use ids::{AgentId, SessionId};
pub use structs::{
    AgentState, DecisionRecord, HistoryWindow, Proposal, TickSnapshot, VoteTally,
};
