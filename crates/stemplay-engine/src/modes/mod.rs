//! The four mini-game sub-machines.
//!
//! Each mode is pure game logic: no timers, no store access. The session
//! dispatcher in `core::session` wraps them with the shared lifecycle.

pub mod puzzle;
pub mod quiz;
pub mod simulation;
pub mod word_hunt;

use serde::Serialize;

use crate::api::types::GameMode;
use crate::error::SessionError;
use crate::input::queue::PlayerAction;

/// Board state of whichever mode a session runs, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ModeSnapshot {
    Quiz(quiz::QuizSnapshot),
    WordHunt(word_hunt::WordHuntSnapshot),
    Puzzle(puzzle::PuzzleSnapshot),
    Simulation(simulation::SimulationSnapshot),
}

/// Rejection for an action addressed to another mode.
pub(crate) fn wrong_mode(action: &PlayerAction, mode: GameMode) -> SessionError {
    SessionError::illegal(format!(
        "{:?} is a {} action, this session runs {}",
        action,
        action.mode(),
        mode
    ))
}
