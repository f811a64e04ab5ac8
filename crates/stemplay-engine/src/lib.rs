pub mod api;
pub mod core;
pub mod input;
pub mod catalog;
pub mod modes;
pub mod store;
pub mod classroom;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{MiniGame, SessionConfig, ModeContext};
pub use api::types::{GameId, GameMode, Difficulty, GridPos, SessionEvent};
pub use core::registry::{ModeRegistry, ModeConstructor};
pub use core::session::{
    GameSession, SessionStatus, AbortReason, Outcome, Rating,
    GameSessionResult, SessionSnapshot,
};
pub use core::time::{Countdown, FixedTimestep};
pub use core::rng::Rng;
pub use input::queue::{PlayerAction, ActionQueue};
pub use catalog::manifest::{CatalogManifest, Subject, GameDefinition, GameContent};
pub use catalog::registry::Catalog;
pub use modes::ModeSnapshot;
pub use modes::quiz::{QuizGame, QuizQuestion, QuizContent, QuizPhase};
pub use modes::word_hunt::{WordHuntGame, WordHuntContent, CheckOutcome};
pub use modes::puzzle::{SlidingPuzzle, PuzzleContent};
pub use modes::simulation::{LabSimulation, SimulationContent, SimulationStep, StepDef};
pub use store::{SessionStore, User, Role, Language, Badge, Certificate};
pub use store::memory::MemoryStore;
pub use store::file::JsonFileStore;
pub use store::accounts::Accounts;
pub use classroom::roster::{Roster, StudentProgress, ClassOverview, SubjectAverage};
pub use classroom::assistant::{Assistant, Message, Sender};
pub use error::{SessionError, CatalogError, StoreError, AccountError};
