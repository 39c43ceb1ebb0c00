//! Type-safe identifier wrappers for sessions and agents.
//!
//! Sessions are identified by UUID v7 (time-ordered) so log lines from
//! overlapping runs remain distinguishable. Agents are identified by a
//! small positional index (`1..=N`) that is stable for the lifetime of a
//! session -- there is no cross-session agent identity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for one simulation session.
    SessionId
}

/// Identifier for a simulated agent within a session.
///
/// Agents are numbered `1..=N` at session construction and keep their
/// number for the whole session. The index carries no meaning beyond
/// identity; agent 1 is not privileged over agent 5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(pub u32);

impl AgentId {
    /// Create an agent identifier from a 1-based index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the inner index value.
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Build the full agent roster for a session of `count` agents,
    /// numbered `1..=count` in ascending order.
    pub fn roster(count: u32) -> Vec<Self> {
        (1..=count).map(Self::new).collect()
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}
