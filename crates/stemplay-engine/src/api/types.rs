use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Catalog identifier of a playable game (e.g. `"sci-quiz-1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Which sub-machine drives a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Quiz,
    WordHunt,
    Puzzle,
    Simulation,
    /// Any mode string this build does not know. Loads fine, refuses to start.
    #[serde(other)]
    Unsupported,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Quiz => "quiz",
            GameMode::WordHunt => "word-hunt",
            GameMode::Puzzle => "puzzle",
            GameMode::Simulation => "simulation",
            GameMode::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A cell on a letter grid. Row-major: `row` counts down, `col` counts across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A session event communicated from Rust to the view layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SessionEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SessionEvent {
    pub const FLOATS: usize = 4;

    /// Quiz answer graded. a = question index, b = 1 if correct else 0.
    pub const ANSWER_CHECKED: f32 = 1.0;
    /// Word hunt target found. a = words found, b = running score.
    pub const WORD_FOUND: f32 = 2.0;
    /// Sliding tile moved. a = from index, b = to index, c = move count.
    pub const TILE_MOVED: f32 = 3.0;
    /// Simulation step done. a = step index, b = running score.
    pub const STEP_COMPLETED: f32 = 4.0;
    /// Natural end. a = score, b = points earned.
    pub const FINISHED: f32 = 5.0;
    /// Countdown expired. a = score accrued so far.
    pub const TIMED_OUT: f32 = 6.0;
    /// Puzzle re-scrambled.
    pub const SHUFFLED: f32 = 7.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
