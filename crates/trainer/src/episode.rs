//! Per-episode statistics and the JSON-lines episode log

use anyhow::Context;
use chess_env::{ChessEnv, StepReason, StepResult, Winner};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::policy::Policy;

/// Summary of one finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Zero-based episode number within the run.
    pub episode: u64,
    /// Steps taken, illegal attempts included.
    pub steps: u32,
    pub total_reward: f64,
    pub illegal_moves: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    /// Why the episode stopped; `None` when a move ended the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StepReason>,
    /// Full-move number the game reached.
    pub moves_made: u32,
}

/// Accumulates step results until an episode ends.
#[derive(Debug, Clone, Default)]
pub struct EpisodeTracker {
    episodes: u64,
    steps: u32,
    total_reward: f64,
}

impl EpisodeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one step, returning the finished episode on termination.
    pub fn record(&mut self, result: &StepResult) -> Option<EpisodeRecord> {
        self.steps += 1;
        self.total_reward += result.reward;

        if !result.terminated {
            return None;
        }

        let record = EpisodeRecord {
            episode: self.episodes,
            steps: self.steps,
            total_reward: self.total_reward,
            illegal_moves: result.info.illegal_moves,
            winner: result.info.winner,
            reason: result.info.reason,
            moves_made: result.info.total_moves_made,
        };
        self.episodes += 1;
        self.steps = 0;
        self.total_reward = 0.0;
        Some(record)
    }

    /// Episodes finished so far.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }
}

/// Appends one JSON object per finished episode to `<dir>/episodes.jsonl`.
pub struct EpisodeLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl EpisodeLog {
    pub const FILE_NAME: &'static str = "episodes.jsonl";

    /// Opens the log in `dir`, creating the directory if needed
    pub fn create(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(Self::FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, record: &EpisodeRecord) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize episode")?;
        writeln!(self.writer).with_context(|| format!("Failed to write {}", self.path.display()))
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Plays one episode from the standard position until it terminates.
///
/// `on_step` sees every step result and the environment after the step.
pub fn run_episode(
    env: &mut ChessEnv,
    policy: &mut dyn Policy,
    mut on_step: impl FnMut(&ChessEnv, &StepResult),
) -> anyhow::Result<EpisodeRecord> {
    let (mut observation, _) = env.reset();
    let mut tracker = EpisodeTracker::new();

    loop {
        let action = policy.predict(&observation);
        let result = env
            .step(action)
            .with_context(|| format!("{} produced action {}", policy.name(), action))?;
        on_step(env, &result);
        observation = result.observation;

        if let Some(record) = tracker.record(&result) {
            return Ok(record);
        }
    }
}

#[cfg(test)]
#[path = "episode_tests.rs"]
mod episode_tests;
