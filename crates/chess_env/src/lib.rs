//! Chess Environment for Reinforcement Learning
//!
//! A Gym-style environment around the `shakmaty` rules engine:
//! - [`MoveCodec`] maps the 4096 from/to square pairs to action indices
//! - [`observation::encode`] turns a position into an 8×8 grid of piece codes
//! - [`reward`] scores each transition (outcome, captures, checks and
//!   positional deltas)
//! - [`ChessEnv`] runs the reset/step state machine, penalizing illegal
//!   moves instead of rejecting them
//!
//! # Usage
//!
//! ```no_run
//! use chess_env::ChessEnv;
//!
//! let mut env = ChessEnv::new();
//! let (observation, _info) = env.reset();
//! let result = env.step(796)?; // e2e4
//! assert!(!result.terminated);
//! # let _ = observation;
//! # Ok::<(), chess_env::EnvError>(())
//! ```

pub mod board;
pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod observation;
pub mod render;
pub mod reward;
pub mod types;

pub use board::{Position, STARTING_FEN};
pub use codec::{MoveCodec, ACTION_SPACE_SIZE, NUM_MOVE_SLOTS};
pub use config::EnvConfig;
pub use env::*;
pub use error::{EnvError, Result};
pub use observation::Observation;
pub use reward::{compute_reward, RewardBreakdown};
pub use types::*;
