//! Training driver for `chess_env`
//!
//! - [`Policy`] implementations: a seeded random baseline and a tabular
//!   action-value learner
//! - [`VecEnv`] and [`Rollout`] for lockstep collection over several
//!   environment copies
//! - [`Trainer`] for the collect/update loop and [`run_episode`] for
//!   evaluation

pub mod config;
pub mod episode;
pub mod policy;
pub mod rollout;
pub mod trainer;

pub use config::TrainingConfig;
pub use episode::{run_episode, EpisodeLog, EpisodeRecord, EpisodeTracker};
pub use policy::{ActionValuePolicy, Policy, PolicyArtifact, RandomPolicy};
pub use rollout::{discounted_returns, Rollout, RolloutStep, VecEnv};
pub use trainer::{Trainer, TrainingSummary};

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
