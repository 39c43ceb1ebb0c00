//! Error types for the engine binary.

/// Errors that can occur while starting or driving the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: concord_core::config::ConfigError,
    },

    /// The session pipeline failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying pipeline error.
        #[from]
        source: concord_core::CoreError,
    },
}
