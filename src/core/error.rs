use thiserror::Error;

/// Errors raised while configuring or running a swarm
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Invalid configuration, detected before any particle is created
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An objective failed (or returned a non-finite value) for a particle
    #[error("Evaluation of objective {objective} failed for particle {particle} in generation {generation}: {reason}")]
    Evaluation {
        generation: u32,
        particle: usize,
        objective: usize,
        reason: String,
    },

    /// Velocity update requested before the particle had a personal best
    #[error("No personal best for objective {objective}; evaluate and track before updating")]
    NotEvaluated { objective: usize },

    /// Velocity update requested without a swarm best to pull towards
    #[error("No swarm best for objective {objective}")]
    NoGlobalBest { objective: usize },

    /// Phase methods called out of order
    #[error("Swarm is in phase {found:?}, expected {expected:?}")]
    Phase {
        expected: crate::optimization::Phase,
        found: crate::optimization::Phase,
    },

    /// A generation observer aborted the run
    #[error("Observer aborted the run: {0}")]
    Observer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
