//! Episode controller: the reset/step state machine.
//!
//! ```text
//! Ready --step--> InPlay --step--> ... --step--> Terminal
//!   ^                                               |
//!   +-------------------- reset --------------------+
//! ```
//!
//! Illegal chess moves are part of exploration. They never raise; they cost
//! `illegal_move_penalty`, leave the position untouched and bump the illegal
//! counter. Once the counter exceeds `max(5, fullmove_number / 2)` the next
//! step ends the episode with `runaway_penalty` without looking at the
//! submitted action. Action indices outside the move table are a caller bug
//! and fail with [`EnvError::InvalidAction`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Position;
use crate::codec::MoveCodec;
use crate::config::EnvConfig;
use crate::error::Result;
use crate::observation::{self, Observation};
use crate::render::render_unicode;
use crate::reward::reward_breakdown;
use crate::types::{Color, Winner};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodePhase {
    /// Freshly reset, no step taken yet.
    Ready,
    InPlay,
    Terminal,
}

/// What a single step did to the episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Move rejected by the rules engine.
    Illegal,
    /// Move applied; `terminal` when the game ended with it.
    Applied { terminal: bool },
    /// Position was already drawn before the step.
    Drawn,
    /// Illegal-move budget exhausted.
    Runaway,
}

/// Per-episode bookkeeping. Replaced wholesale on reset and only changed
/// through [`EpisodeState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeState {
    pub phase: EpisodePhase,
    /// Flips exactly once per applied move.
    pub current_player: Color,
    /// Never decreases within an episode.
    pub illegal_moves: u32,
}

impl EpisodeState {
    pub fn new(starting_player: Color) -> Self {
        Self {
            phase: EpisodePhase::Ready,
            current_player: starting_player,
            illegal_moves: 0,
        }
    }

    pub fn advance(self, transition: Transition) -> Self {
        match transition {
            Transition::Illegal => Self {
                phase: self.ongoing_phase(),
                illegal_moves: self.illegal_moves + 1,
                ..self
            },
            Transition::Applied { terminal } => Self {
                phase: if terminal {
                    EpisodePhase::Terminal
                } else {
                    EpisodePhase::InPlay
                },
                current_player: self.current_player.other(),
                ..self
            },
            Transition::Drawn | Transition::Runaway => Self {
                phase: EpisodePhase::Terminal,
                ..self
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == EpisodePhase::Terminal
    }

    fn ongoing_phase(&self) -> EpisodePhase {
        match self.phase {
            EpisodePhase::Terminal => EpisodePhase::Terminal,
            _ => EpisodePhase::InPlay,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepReason {
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "illegal move")]
    IllegalMove,
    #[serde(rename = "too many illegal moves")]
    TooManyIllegalMoves,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
}

/// Metadata returned by [`ChessEnv::reset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResetInfo {
    pub initial_board_fen: String,
    pub starting_player: Color,
    /// Rook squares that still carry castling rights, as a bitmask.
    pub castling_rights: u64,
    pub en_passant_square: Option<u8>,
}

/// Metadata returned by [`ChessEnv::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StepReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_reason: Option<DrawReason>,
    pub illegal_moves: u32,
    pub total_moves_made: u32,
    pub in_check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// No time limit is enforced, so this is always `false`.
    pub truncated: bool,
    pub info: StepInfo,
}

/// Chess environment with the reset/step contract expected by training
/// loops. One instance drives one game at a time.
#[derive(Debug, Clone)]
pub struct ChessEnv {
    config: EnvConfig,
    codec: MoveCodec,
    position: Position,
    episode: EpisodeState,
}

impl Default for ChessEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessEnv {
    pub fn new() -> Self {
        Self::with_config(EnvConfig::default())
    }

    pub fn with_config(config: EnvConfig) -> Self {
        Self {
            config,
            codec: MoveCodec::new(),
            position: Position::startpos(),
            episode: EpisodeState::new(Color::White),
        }
    }

    /// Starts a new episode from the standard position with white to move.
    pub fn reset(&mut self) -> (Observation, ResetInfo) {
        self.reset_to(Position::startpos())
    }

    /// Starts a new episode from `position`; its side to move plays first.
    pub fn reset_to(&mut self, position: Position) -> (Observation, ResetInfo) {
        self.position = position;
        self.episode = EpisodeState::new(self.position.turn());

        let info = ResetInfo {
            initial_board_fen: self.position.fen(),
            starting_player: self.episode.current_player,
            castling_rights: self.position.castling_rights(),
            en_passant_square: self.position.ep_square(),
        };
        debug!(fen = %info.initial_board_fen, "episode reset");

        (self.observation(), info)
    }

    pub fn step(&mut self, action: usize) -> Result<StepResult> {
        let mv = self.codec.decode(action)?;

        if let Some(draw_reason) = self.draw_reason() {
            self.episode = self.episode.advance(Transition::Drawn);
            info!(?draw_reason, "episode ended in a draw");
            let info = StepInfo {
                reason: Some(StepReason::Draw),
                draw_reason: Some(draw_reason),
                winner: Some(Winner::Draw),
                ..self.info()
            };
            return Ok(self.result(self.config.draw_reward, true, info));
        }

        let threshold = self
            .config
            .illegal_threshold(self.position.fullmove_number());
        if self.episode.illegal_moves > threshold {
            self.episode = self.episode.advance(Transition::Runaway);
            warn!(
                illegal_moves = self.episode.illegal_moves,
                threshold, "too many illegal moves, ending episode"
            );
            let info = StepInfo {
                reason: Some(StepReason::TooManyIllegalMoves),
                ..self.info()
            };
            return Ok(self.result(self.config.runaway_penalty, true, info));
        }

        if !self.position.is_legal(mv) {
            self.episode = self.episode.advance(Transition::Illegal);
            debug!(
                action,
                %mv,
                illegal_moves = self.episode.illegal_moves,
                "illegal move"
            );
            let info = StepInfo {
                reason: Some(StepReason::IllegalMove),
                ..self.info()
            };
            return Ok(self.result(self.config.illegal_move_penalty, false, info));
        }

        let mover = self.episode.current_player;
        let previous = self.position.clone();
        self.position.push(mv)?;

        let reward = reward_breakdown(mv, &previous, &self.position, mover);
        let terminated = self.position.is_game_over();
        self.episode = self
            .episode
            .advance(Transition::Applied { terminal: terminated });
        debug!(%mv, ?mover, ?reward, "move applied");

        let mut info = self.info();
        if terminated {
            info.winner = self.position.outcome();
            info!(
                winner = ?info.winner,
                moves = info.total_moves_made,
                illegal_moves = info.illegal_moves,
                "episode finished"
            );
        }

        Ok(self.result(reward.total(), terminated, info))
    }

    pub fn observation(&self) -> Observation {
        observation::encode(&self.position)
    }

    /// Board as text, colors inverted for dark terminals.
    pub fn render(&self) -> String {
        render_unicode(&self.position, true)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn episode(&self) -> EpisodeState {
        self.episode
    }

    pub fn codec(&self) -> &MoveCodec {
        &self.codec
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn action_space_size(&self) -> usize {
        self.codec.action_space_size()
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        if self.position.is_stalemate() {
            Some(DrawReason::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else {
            None
        }
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            reason: None,
            draw_reason: None,
            illegal_moves: self.episode.illegal_moves,
            total_moves_made: self.position.fullmove_number(),
            in_check: self.position.is_check(),
            winner: None,
        }
    }

    fn result(&self, reward: f64, terminated: bool, info: StepInfo) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated: false,
            info,
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod env_tests;
