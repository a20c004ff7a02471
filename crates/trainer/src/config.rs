//! Training hyperparameters. There are no CLI flags; edit the defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Environment steps to collect, summed over all environment copies.
    pub total_timesteps: u64,
    /// Steps collected per environment before each policy update.
    pub n_steps: usize,
    /// Independent environment copies stepped in lockstep.
    pub num_envs: usize,
    pub learning_rate: f64,
    /// Discount factor for returns.
    pub gamma: f64,
    /// Probability of a uniformly random action while training.
    pub exploration: f64,
    pub seed: u64,
    /// Where the trained policy is written.
    pub model_path: PathBuf,
    /// Directory for per-episode logs.
    pub log_dir: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total_timesteps: 1_000_000,
            n_steps: 8192,
            num_envs: 1,
            learning_rate: 0.01,
            gamma: 0.99,
            exploration: 0.1,
            seed: 42,
            model_path: PathBuf::from("chess_agent_v0.json"),
            log_dir: PathBuf::from("training_logs"),
        }
    }
}
