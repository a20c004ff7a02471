//! Rollout collection over several environment copies

use chess_env::{ChessEnv, EnvConfig, Observation, StepResult};

/// One recorded step of one environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutStep {
    pub action: usize,
    pub reward: f64,
    /// The episode ended with this step.
    pub terminated: bool,
}

/// Independent environments stepped in lockstep.
///
/// An environment whose episode ends is reset immediately: the returned
/// result still describes the terminal transition, but its observation is
/// the first one of the next episode.
#[derive(Debug, Clone)]
pub struct VecEnv {
    envs: Vec<ChessEnv>,
    observations: Vec<Observation>,
}

impl VecEnv {
    pub fn new(num_envs: usize, config: &EnvConfig) -> Self {
        let envs: Vec<ChessEnv> = (0..num_envs.max(1))
            .map(|_| ChessEnv::with_config(config.clone()))
            .collect();
        let observations = envs.iter().map(ChessEnv::observation).collect();
        Self { envs, observations }
    }

    /// Resets every environment and returns the initial observations
    pub fn reset(&mut self) -> &[Observation] {
        for (env, observation) in self.envs.iter_mut().zip(&mut self.observations) {
            *observation = env.reset().0;
        }
        &self.observations
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub fn env(&self, index: usize) -> &ChessEnv {
        &self.envs[index]
    }

    /// Steps environment `i` with `actions[i]`.
    ///
    /// Fails on the first action index outside the move table; environments
    /// before it have already been stepped.
    pub fn step(&mut self, actions: &[usize]) -> chess_env::Result<Vec<StepResult>> {
        debug_assert_eq!(actions.len(), self.envs.len());

        let mut results = Vec::with_capacity(self.envs.len());
        for ((env, observation), &action) in self
            .envs
            .iter_mut()
            .zip(&mut self.observations)
            .zip(actions)
        {
            let mut result = env.step(action)?;
            if result.terminated {
                result.observation = env.reset().0;
            }
            *observation = result.observation;
            results.push(result);
        }
        Ok(results)
    }
}

/// Fixed-length step buffers, one per environment.
#[derive(Debug, Clone)]
pub struct Rollout {
    steps: Vec<Vec<RolloutStep>>,
    capacity: usize,
}

impl Rollout {
    pub fn new(num_envs: usize, capacity: usize) -> Self {
        Self {
            steps: (0..num_envs)
                .map(|_| Vec::with_capacity(capacity))
                .collect(),
            capacity,
        }
    }

    pub fn push(&mut self, env_index: usize, step: RolloutStep) {
        self.steps[env_index].push(step);
    }

    /// True once every buffer holds `capacity` steps.
    pub fn is_full(&self) -> bool {
        self.steps.iter().all(|buffer| buffer.len() >= self.capacity)
    }

    /// Steps recorded across all environments.
    pub fn len(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        for buffer in &mut self.steps {
            buffer.clear();
        }
    }

    /// Every recorded `(step, discounted return)` pair.
    pub fn samples(&self, gamma: f64) -> Vec<(RolloutStep, f64)> {
        self.steps
            .iter()
            .flat_map(|buffer| {
                let returns = discounted_returns(buffer, gamma);
                buffer.iter().copied().zip(returns)
            })
            .collect()
    }
}

/// Discounted return of every step, computed backwards.
///
/// Returns do not flow across episode boundaries. A trailing unfinished
/// episode is treated as if it ended after the last recorded step.
pub fn discounted_returns(steps: &[RolloutStep], gamma: f64) -> Vec<f64> {
    let mut returns = vec![0.0; steps.len()];
    let mut running = 0.0;
    for (i, step) in steps.iter().enumerate().rev() {
        if step.terminated {
            running = 0.0;
        }
        running = step.reward + gamma * running;
        returns[i] = running;
    }
    returns
}

#[cfg(test)]
#[path = "rollout_tests.rs"]
mod rollout_tests;
