use std::collections::HashMap;

use crate::api::game::MiniGame;
use crate::api::types::GameMode;
use crate::catalog::manifest::{GameContent, GameDefinition};
use crate::core::session::GameSession;
use crate::error::SessionError;
use crate::modes::puzzle::SlidingPuzzle;
use crate::modes::quiz::QuizGame;
use crate::modes::simulation::LabSimulation;
use crate::modes::word_hunt::WordHuntGame;

/// Builds a sub-machine from a catalog entry.
pub type ModeConstructor = fn(&GameDefinition) -> Result<Box<dyn MiniGame>, SessionError>;

/// Maps each game mode to the constructor of its sub-machine.
pub struct ModeRegistry {
    constructors: HashMap<GameMode, ModeConstructor>,
}

impl ModeRegistry {
    /// A registry with no modes. Every `start` fails until modes are registered.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for a mode.
    pub fn register(&mut self, mode: GameMode, constructor: ModeConstructor) -> Option<ModeConstructor> {
        self.constructors.insert(mode, constructor)
    }

    pub fn supports(&self, mode: GameMode) -> bool {
        self.constructors.contains_key(&mode)
    }

    /// Validate a definition and build its sub-machine.
    pub fn build(&self, def: &GameDefinition) -> Result<Box<dyn MiniGame>, SessionError> {
        let constructor = self.constructors.get(&def.mode).ok_or_else(|| {
            SessionError::invalid(format!("{}: no sub-machine registered for mode `{}`", def.id, def.mode))
        })?;
        if def.points == 0 {
            return Err(SessionError::invalid(format!("{}: point value must be positive", def.id)));
        }
        if def.time_limit == Some(0) {
            return Err(SessionError::invalid(format!("{}: time limit must be positive", def.id)));
        }
        if def.content.mode() != def.mode {
            return Err(SessionError::invalid(format!(
                "{}: {} content in a {} game",
                def.id,
                def.content.mode(),
                def.mode
            )));
        }
        constructor(def).map_err(|err| match err {
            SessionError::InvalidDefinition(reason) => {
                SessionError::invalid(format!("{}: {}", def.id, reason))
            }
            other => other,
        })
    }

    /// Build a session for `def` and start it. No session exists on error.
    pub fn start(&self, def: &GameDefinition) -> Result<GameSession, SessionError> {
        let machine = self.build(def)?;
        let mut session = GameSession::new(def, machine);
        session.start()?;
        Ok(session)
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(GameMode::Quiz, build_quiz);
        registry.register(GameMode::WordHunt, build_word_hunt);
        registry.register(GameMode::Puzzle, build_puzzle);
        registry.register(GameMode::Simulation, build_simulation);
        registry
    }
}

fn build_quiz(def: &GameDefinition) -> Result<Box<dyn MiniGame>, SessionError> {
    match &def.content {
        GameContent::Quiz(content) => Ok(Box::new(QuizGame::new(content)?)),
        _ => Err(SessionError::invalid("expected quiz content")),
    }
}

fn build_word_hunt(def: &GameDefinition) -> Result<Box<dyn MiniGame>, SessionError> {
    match &def.content {
        GameContent::WordHunt(content) => Ok(Box::new(WordHuntGame::new(content)?)),
        _ => Err(SessionError::invalid("expected word-hunt content")),
    }
}

fn build_puzzle(def: &GameDefinition) -> Result<Box<dyn MiniGame>, SessionError> {
    match &def.content {
        GameContent::Puzzle(content) => Ok(Box::new(SlidingPuzzle::new(content)?)),
        _ => Err(SessionError::invalid("expected puzzle content")),
    }
}

fn build_simulation(def: &GameDefinition) -> Result<Box<dyn MiniGame>, SessionError> {
    match &def.content {
        GameContent::Simulation(content) => Ok(Box::new(LabSimulation::new(content)?)),
        _ => Err(SessionError::invalid("expected simulation content")),
    }
}
