//! Policies that pick action indices from observations.
//!
//! Both policies only emit indices from the populated move table
//! (`0..NUM_MOVE_SLOTS`), never the reserved tail of the action space.

use anyhow::{bail, Context};
use chess_env::{Observation, NUM_MOVE_SLOTS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TrainingConfig;

/// Trait that all policies must implement.
///
/// This lets the rollout driver and the evaluation binary run any agent,
/// from the random baseline to a trained model.
pub trait Policy {
    /// Picks the next action for `observation`.
    fn predict(&mut self, observation: &Observation) -> usize;

    /// Returns the policy's name for logs and reports
    fn name(&self) -> &str;
}

/// Uniformly random actions. Useful as a baseline: any trained policy should
/// collect fewer illegal-move penalties than this.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn predict(&mut self, _observation: &Observation) -> usize {
        self.rng.gen_range(0..NUM_MOVE_SLOTS)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Tabular action-value baseline.
///
/// Keeps one running estimate per action index, ignoring the board, and acts
/// epsilon-greedily. It learns which from/to pairs tend to pay off (and which
/// are almost always illegal) and exercises the full training contract.
#[derive(Debug, Clone)]
pub struct ActionValuePolicy {
    values: Vec<f64>,
    visits: Vec<u64>,
    exploration: f64,
    /// Index of the highest value, lowest index on ties.
    best: usize,
    rng: StdRng,
}

impl ActionValuePolicy {
    pub fn new(exploration: f64, seed: u64) -> Self {
        Self {
            values: vec![0.0; NUM_MOVE_SLOTS],
            visits: vec![0; NUM_MOVE_SLOTS],
            exploration,
            best: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_artifact(artifact: PolicyArtifact, exploration: f64, seed: u64) -> Self {
        let mut policy = Self {
            values: artifact.values,
            visits: artifact.visits,
            exploration,
            best: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        policy.refresh_best();
        policy
    }

    pub fn to_artifact(&self, config: &TrainingConfig) -> PolicyArtifact {
        PolicyArtifact {
            policy: self.name().to_string(),
            config: config.clone(),
            values: self.values.clone(),
            visits: self.visits.clone(),
        }
    }

    pub fn greedy_action(&self) -> usize {
        self.best
    }

    pub fn value(&self, action: usize) -> f64 {
        self.values[action]
    }

    pub fn visits(&self, action: usize) -> u64 {
        self.visits[action]
    }

    pub fn set_exploration(&mut self, exploration: f64) {
        self.exploration = exploration;
    }

    /// Moves the estimate for `action` toward `target`.
    pub fn update(&mut self, action: usize, target: f64, learning_rate: f64) {
        let value = &mut self.values[action];
        *value += learning_rate * (target - *value);
        self.visits[action] += 1;

        let updated = self.values[action];
        if action == self.best {
            self.refresh_best();
        } else if updated > self.values[self.best]
            || (updated == self.values[self.best] && action < self.best)
        {
            self.best = action;
        }
    }

    fn refresh_best(&mut self) {
        let mut best = 0;
        for (action, &value) in self.values.iter().enumerate() {
            if value > self.values[best] {
                best = action;
            }
        }
        self.best = best;
    }
}

impl Policy for ActionValuePolicy {
    fn predict(&mut self, _observation: &Observation) -> usize {
        if self.rng.gen::<f64>() < self.exploration {
            self.rng.gen_range(0..NUM_MOVE_SLOTS)
        } else {
            self.best
        }
    }

    fn name(&self) -> &str {
        "action-value"
    }
}

/// Trained policy as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyArtifact {
    pub policy: String,
    /// Hyperparameters the policy was trained with.
    pub config: TrainingConfig,
    pub values: Vec<f64>,
    pub visits: Vec<u64>,
}

impl PolicyArtifact {
    /// Save artifact to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize policy")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load artifact from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let artifact: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if artifact.values.len() != NUM_MOVE_SLOTS || artifact.visits.len() != NUM_MOVE_SLOTS {
            bail!(
                "{} holds {} values and {} visit counts, expected {} of each",
                path.display(),
                artifact.values.len(),
                artifact.visits.len(),
                NUM_MOVE_SLOTS
            );
        }
        Ok(artifact)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
