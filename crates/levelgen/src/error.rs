//! Error types surfaced by configuration loading and level generation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse generator config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("board {width}x{height} is too small for a 3x3 room layout")]
    BoardTooSmall { width: usize, height: usize },

    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Generation failures. Reaching `AttemptsExhausted` means the board size or
/// layout is infeasible; callers have no retry policy beyond this.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("board {width}x{height} is too small for a 3x3 room layout")]
    BoardTooSmall { width: usize, height: usize },

    #[error("difficulty must be a positive integer")]
    ZeroDifficulty,

    #[error("failed to generate a connected level after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
