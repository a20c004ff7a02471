//! Training loop: collect rollouts, update the policy toward discounted
//! returns, log finished episodes.

use chess_env::{EnvConfig, StepReason, Winner};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::episode::{EpisodeLog, EpisodeRecord, EpisodeTracker};
use crate::policy::{ActionValuePolicy, Policy, PolicyArtifact};
use crate::rollout::{Rollout, RolloutStep, VecEnv};

/// Aggregate statistics of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub timesteps: u64,
    pub episodes: u64,
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
    /// Episodes cut short by the illegal-move budget.
    pub runaways: u64,
    pub total_reward: f64,
}

impl TrainingSummary {
    pub fn add(&mut self, record: &EpisodeRecord) {
        self.episodes += 1;
        self.total_reward += record.total_reward;
        match record.winner {
            Some(Winner::White) => self.white_wins += 1,
            Some(Winner::Black) => self.black_wins += 1,
            Some(Winner::Draw) => self.draws += 1,
            None => {}
        }
        if record.reason == Some(StepReason::TooManyIllegalMoves) {
            self.runaways += 1;
        }
    }

    /// Mean reward per finished episode
    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timesteps:     {}", self.timesteps)?;
        writeln!(f, "Episodes:      {}", self.episodes)?;
        writeln!(f, "Mean reward:   {:.3}", self.mean_reward())?;
        writeln!(
            f,
            "Results:       {} white / {} black / {} draws",
            self.white_wins, self.black_wins, self.draws
        )?;
        write!(f, "Runaways:      {}", self.runaways)
    }
}

pub struct Trainer {
    config: TrainingConfig,
    env_config: EnvConfig,
    policy: ActionValuePolicy,
}

impl Trainer {
    pub fn new(config: TrainingConfig, env_config: EnvConfig) -> Self {
        let policy = ActionValuePolicy::new(config.exploration, config.seed);
        Self {
            config,
            env_config,
            policy,
        }
    }

    /// Runs until `total_timesteps` steps have been collected.
    ///
    /// Finished episodes are appended to `log` when one is given.
    pub fn train(&mut self, mut log: Option<&mut EpisodeLog>) -> anyhow::Result<TrainingSummary> {
        let mut envs = VecEnv::new(self.config.num_envs, &self.env_config);
        envs.reset();
        let mut rollout = Rollout::new(envs.len(), self.config.n_steps.max(1));
        let mut trackers = vec![EpisodeTracker::new(); envs.len()];
        let mut summary = TrainingSummary::default();

        info!(
            total_timesteps = self.config.total_timesteps,
            num_envs = envs.len(),
            n_steps = self.config.n_steps,
            "training started"
        );

        while summary.timesteps < self.config.total_timesteps {
            while !rollout.is_full() && summary.timesteps < self.config.total_timesteps {
                let actions: Vec<usize> = envs
                    .observations()
                    .iter()
                    .map(|observation| self.policy.predict(observation))
                    .collect();
                let results = envs.step(&actions)?;
                summary.timesteps += results.len() as u64;

                for (i, (result, &action)) in results.iter().zip(&actions).enumerate() {
                    rollout.push(
                        i,
                        RolloutStep {
                            action,
                            reward: result.reward,
                            terminated: result.terminated,
                        },
                    );
                    if let Some(mut record) = trackers[i].record(result) {
                        record.episode = summary.episodes;
                        debug!(?record, "episode finished");
                        if let Some(log) = log.as_deref_mut() {
                            log.append(&record)?;
                        }
                        summary.add(&record);
                    }
                }
            }

            for (step, target) in rollout.samples(self.config.gamma) {
                self.policy
                    .update(step.action, target, self.config.learning_rate);
            }
            rollout.clear();

            info!(
                timesteps = summary.timesteps,
                episodes = summary.episodes,
                mean_reward = summary.mean_reward(),
                greedy_action = self.policy.greedy_action(),
                "policy updated"
            );
        }

        if let Some(log) = log {
            log.flush()?;
        }
        Ok(summary)
    }

    pub fn policy(&self) -> &ActionValuePolicy {
        &self.policy
    }

    /// Trained policy together with the hyperparameters used
    pub fn artifact(&self) -> PolicyArtifact {
        self.policy.to_artifact(&self.config)
    }
}

#[cfg(test)]
#[path = "trainer_tests.rs"]
mod trainer_tests;
