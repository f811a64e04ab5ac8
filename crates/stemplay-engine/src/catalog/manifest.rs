use serde::{Deserialize, Serialize};

use crate::api::types::{Difficulty, GameId, GameMode};
use crate::modes::puzzle::PuzzleContent;
use crate::modes::quiz::QuizContent;
use crate::modes::simulation::SimulationContent;
use crate::modes::word_hunt::WordHuntContent;

/// Catalog manifest describing every subject and its games.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default = "default_version")]
    pub version: u32,
    pub subjects: Vec<Subject>,
}

/// A subject tile on the student dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Stable id (e.g., "science").
    pub id: String,
    pub name: String,
    /// Gradient class used by the view (e.g., "from-blue-500 to-green-500").
    #[serde(default)]
    pub color: String,
    /// Course progress percentage shown on the tile.
    #[serde(default)]
    pub progress: u8,
    pub games: Vec<GameDefinition>,
}

/// One playable game. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDefinition {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Points for a perfect run. Must be > 0.
    pub points: u32,
    /// Display duration (e.g., "15 min").
    #[serde(default)]
    pub duration: String,
    /// Number of players who have tried it.
    #[serde(default)]
    pub players: u32,
    /// Overrides the mode's countdown budget, in seconds.
    #[serde(default)]
    pub time_limit: Option<u32>,
    pub content: GameContent,
}

/// Mode-specific data. The tag must agree with `GameDefinition::mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GameContent {
    Quiz(QuizContent),
    WordHunt(WordHuntContent),
    Puzzle(PuzzleContent),
    Simulation(SimulationContent),
}

impl GameContent {
    /// The mode this content block feeds.
    pub fn mode(&self) -> GameMode {
        match self {
            GameContent::Quiz(_) => GameMode::Quiz,
            GameContent::WordHunt(_) => GameMode::WordHunt,
            GameContent::Puzzle(_) => GameMode::Puzzle,
            GameContent::Simulation(_) => GameMode::Simulation,
        }
    }
}

fn default_version() -> u32 {
    1
}

impl CatalogManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
