use thiserror::Error;

/// Errors surfaced by the environment.
///
/// Illegal chess moves submitted through [`crate::ChessEnv::step`] are not
/// errors; they are penalized and reported in the step metadata.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Action index outside the populated move table.
    #[error("invalid action {index}: only indices 0..{populated} map to moves")]
    InvalidAction { index: usize, populated: usize },

    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// FEN parsed, but the position breaks the rules (e.g. missing king).
    #[error("illegal position `{fen}`: {reason}")]
    IllegalPosition { fen: String, reason: String },

    #[error("move {uci} is not legal in the current position")]
    IllegalMove { uci: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
