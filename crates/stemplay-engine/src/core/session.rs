use serde::{Deserialize, Serialize};

use crate::api::game::{MiniGame, ModeContext, SessionConfig};
use crate::api::types::{GameId, GameMode, SessionEvent};
use crate::catalog::manifest::GameDefinition;
use crate::core::time::{format_clock, Countdown};
use crate::error::{SessionError, StoreError};
use crate::input::queue::PlayerAction;
use crate::modes::ModeSnapshot;
use crate::store::SessionStore;

/// Percentage at or above which a run is rated excellent.
const EXCELLENT_PERCENT: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The countdown ran out before the game's own end.
    TimedOut,
    /// The caller walked away. No result, no progress.
    Abandoned,
}

/// Session lifecycle shared by every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    Running,
    Finished,
    Aborted { reason: AbortReason },
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Finished | SessionStatus::Aborted { .. })
    }
}

/// How a session with a result ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Natural end via the mode's completion rule.
    Finished,
    /// Forced end by countdown expiry.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    GoodEffort,
}

/// Final tally of a session, owned by the caller once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSessionResult {
    pub game_id: GameId,
    pub mode: GameMode,
    pub outcome: Outcome,
    /// True only for a natural end.
    pub completed: bool,
    pub score: u32,
    pub max_score: u32,
    /// round(score / max_score × 100).
    pub percentage: u32,
    /// round(score / max_score × point value).
    pub points_earned: u32,
    /// Time units played.
    pub elapsed: u32,
    /// Time units left on the countdown; `None` for untimed games.
    pub remaining: Option<u32>,
    pub rating: Rating,
}

/// Points for `score` out of `max_score` on a game worth `point_value`.
pub fn points_for(score: u32, max_score: u32, point_value: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (score as f64 / max_score as f64 * point_value as f64).round() as u32
}

/// Everything the view layer needs to draw a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub game_id: GameId,
    pub name: String,
    pub mode: GameMode,
    pub status: SessionStatus,
    pub score: u32,
    pub max_score: u32,
    pub point_value: u32,
    pub time_limit: Option<u32>,
    pub remaining: Option<u32>,
    pub elapsed: u32,
    /// `m:ss` countdown text for timed games.
    pub clock: Option<String>,
    pub board: ModeSnapshot,
    pub result: Option<GameSessionResult>,
}

/// One run of one mini-game.
///
/// Wraps a mode sub-machine with the shared lifecycle and countdown.
/// Operations on a session that is not running are rejected, and ticks after
/// a terminal state are ignored, so a stale timer cannot touch a finished game.
pub struct GameSession {
    game_id: GameId,
    name: String,
    point_value: u32,
    machine: Box<dyn MiniGame>,
    ctx: ModeContext,
    config: SessionConfig,
    countdown: Countdown,
    status: SessionStatus,
    reported: bool,
}

impl GameSession {
    /// Wrap a built sub-machine. The session starts in `Created`.
    /// Use `ModeRegistry::start` to validate and start in one go.
    pub fn new(def: &GameDefinition, machine: Box<dyn MiniGame>) -> Self {
        let mut config = machine.config();
        if def.time_limit.is_some() {
            config.time_limit = def.time_limit;
        }
        Self {
            game_id: def.id.clone(),
            name: def.name.clone(),
            point_value: def.points,
            machine,
            ctx: ModeContext::new(config.max_events),
            countdown: Countdown::new(config.time_limit),
            config,
            status: SessionStatus::Created,
            reported: false,
        }
    }

    /// Created → Running. Starts the countdown.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Created {
            return Err(SessionError::illegal(format!(
                "session {} already started ({:?})",
                self.game_id, self.status
            )));
        }
        self.status = SessionStatus::Running;
        match self.config.time_limit {
            Some(limit) => log::info!(
                "session {}: started {} ({}s limit)",
                self.game_id,
                self.machine.mode(),
                limit
            ),
            None => log::info!("session {}: started {} (untimed)", self.game_id, self.machine.mode()),
        }
        Ok(())
    }

    /// Apply one player action. Rejected actions leave the session unchanged.
    pub fn apply(&mut self, action: &PlayerAction) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            let err = SessionError::illegal(format!("session {} is not running ({:?})", self.game_id, self.status));
            log::warn!("{}", err);
            return Err(err);
        }
        if let Err(err) = self.machine.apply(action, &mut self.ctx) {
            log::warn!("session {}: {:?} rejected: {}", self.game_id, action, err);
            return Err(err);
        }
        log::debug!("session {}: {:?} -> score {}", self.game_id, action, self.machine.score());

        if self.machine.is_finished() {
            self.finish();
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.status = SessionStatus::Finished;
        let points = self.points_earned();
        self.ctx.emit_event(SessionEvent::new(
            SessionEvent::FINISHED,
            self.machine.score() as f32,
            points as f32,
            self.countdown.elapsed() as f32,
        ));
        log::info!(
            "session {}: finished with {}/{} (+{} points)",
            self.game_id,
            self.machine.score(),
            self.machine.max_score(),
            points
        );
    }

    /// Advance the clock by one unit. Returns `false` if the session is not
    /// running and the tick was ignored.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        if self.countdown.tick() {
            self.status = SessionStatus::Aborted { reason: AbortReason::TimedOut };
            self.ctx.emit_event(SessionEvent::new(
                SessionEvent::TIMED_OUT,
                self.machine.score() as f32,
                self.points_earned() as f32,
                0.0,
            ));
            log::info!(
                "session {}: time up with {}/{}",
                self.game_id,
                self.machine.score(),
                self.machine.max_score()
            );
        }
        true
    }

    /// Discard the session. No result is produced and nothing is reported.
    pub fn abandon(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = SessionStatus::Aborted { reason: AbortReason::Abandoned };
        log::info!("session {}: abandoned", self.game_id);
    }

    // -- Mode operations --

    pub fn select_answer(&mut self, choice: usize) -> Result<(), SessionError> {
        self.apply(&PlayerAction::SelectAnswer { choice })
    }

    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::Advance)
    }

    pub fn toggle_hint(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::ToggleHint)
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        self.apply(&PlayerAction::ToggleCell { row, col })
    }

    pub fn check_selection(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::CheckSelection)
    }

    pub fn clear_selection(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::ClearSelection)
    }

    pub fn click_tile(&mut self, index: usize) -> Result<(), SessionError> {
        self.apply(&PlayerAction::ClickTile { index })
    }

    pub fn shuffle(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::Shuffle)
    }

    pub fn complete_current_step(&mut self) -> Result<(), SessionError> {
        self.apply(&PlayerAction::CompleteStep)
    }

    // -- Queries --

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn mode(&self) -> GameMode {
        self.machine.mode()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.machine.score()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    pub fn elapsed(&self) -> u32 {
        self.countdown.elapsed()
    }

    fn points_earned(&self) -> u32 {
        points_for(self.machine.score(), self.machine.max_score(), self.point_value)
    }

    /// The result of a finished or timed-out session.
    pub fn result(&self) -> Option<GameSessionResult> {
        let outcome = match self.status {
            SessionStatus::Finished => Outcome::Finished,
            SessionStatus::Aborted { reason: AbortReason::TimedOut } => Outcome::TimedOut,
            _ => return None,
        };
        let score = self.machine.score();
        let max_score = self.machine.max_score();
        let percentage = points_for(score, max_score, 100);
        Some(GameSessionResult {
            game_id: self.game_id.clone(),
            mode: self.machine.mode(),
            outcome,
            completed: outcome == Outcome::Finished,
            score,
            max_score,
            percentage,
            points_earned: self.points_earned(),
            elapsed: self.countdown.elapsed(),
            remaining: self.countdown.remaining(),
            rating: if percentage >= EXCELLENT_PERCENT { Rating::Excellent } else { Rating::GoodEffort },
        })
    }

    /// Record a natural end in the store. Only the first call after `Finished`
    /// writes; timed-out and abandoned sessions never do.
    pub fn report<S: SessionStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<GameSessionResult>, StoreError> {
        if self.reported || self.status != SessionStatus::Finished {
            return Ok(None);
        }
        let Some(result) = self.result() else {
            return Ok(None);
        };
        store.update_progress(result.points_earned, 1)?;
        self.reported = true;
        log::info!("session {}: recorded +{} points", self.game_id, result.points_earned);
        Ok(Some(result))
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let remaining = self.countdown.remaining();
        SessionSnapshot {
            game_id: self.game_id.clone(),
            name: self.name.clone(),
            mode: self.machine.mode(),
            status: self.status,
            score: self.machine.score(),
            max_score: self.machine.max_score(),
            point_value: self.point_value,
            time_limit: self.countdown.limit(),
            remaining,
            elapsed: self.countdown.elapsed(),
            clock: remaining.map(format_clock),
            board: self.machine.snapshot(),
            result: self.result(),
        }
    }

    /// Events emitted since the last `clear_frame_data`.
    pub fn events(&self) -> &[SessionEvent] {
        self.ctx.events()
    }

    pub fn clear_frame_data(&mut self) {
        self.ctx.clear_frame_data();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Difficulty;
    use crate::catalog::manifest::GameContent;
    use crate::core::registry::ModeRegistry;
    use crate::modes::puzzle::PuzzleContent;
    use crate::modes::quiz::{QuizContent, QuizQuestion, QUIZ_TIME_LIMIT};
    use crate::modes::simulation::{SimulationContent, StepDef};
    use crate::modes::word_hunt::WordHuntContent;
    use crate::store::memory::MemoryStore;
    use crate::store::{Role, User};

    fn def(id: &str, mode: GameMode, points: u32, content: GameContent) -> GameDefinition {
        GameDefinition {
            id: GameId::from(id),
            name: id.to_string(),
            description: String::new(),
            mode,
            difficulty: Difficulty::Easy,
            points,
            duration: String::new(),
            players: 0,
            time_limit: None,
            content,
        }
    }

    fn quiz_def(questions: usize, points: u32) -> GameDefinition {
        let q = QuizQuestion {
            question: "What is the chemical symbol for water?".into(),
            options: vec!["H2O".into(), "CO2".into(), "NaCl".into(), "O2".into()],
            correct: 0,
            hint: "Hydrogen and oxygen.".into(),
        };
        def(
            "sci-quiz-1",
            GameMode::Quiz,
            points,
            GameContent::Quiz(QuizContent { questions: vec![q; questions] }),
        )
    }

    fn start(def: &GameDefinition) -> GameSession {
        ModeRegistry::default().start(def).unwrap()
    }

    fn store_with_student() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set_user(User::new("u1", "priya", "priya@school.in", Role::Student)).unwrap();
        store
    }

    fn answer(session: &mut GameSession, choices: &[usize]) {
        for &c in choices {
            session.select_answer(c).unwrap();
            session.advance().unwrap();
        }
    }

    #[test]
    fn two_of_three_correct_earns_67() {
        let mut session = start(&quiz_def(3, 100));
        answer(&mut session, &[0, 2, 0]);
        let result = session.result().unwrap();
        assert_eq!(result.outcome, Outcome::Finished);
        assert!(result.completed);
        assert_eq!(result.score, 2);
        assert_eq!(result.points_earned, 67);
        assert_eq!(result.percentage, 67);
        assert_eq!(result.rating, Rating::GoodEffort);
    }

    #[test]
    fn quiz_points_follow_the_ratio() {
        for (correct, points) in [(0usize, 0u32), (1, 43), (3, 130)] {
            let mut session = start(&quiz_def(3, 130));
            let choices: Vec<usize> = (0..3).map(|i| if i < correct { 0 } else { 1 }).collect();
            answer(&mut session, &choices);
            let result = session.result().unwrap();
            assert!(result.score <= 3);
            assert_eq!(result.points_earned, points);
        }
    }

    #[test]
    fn quiz_counts_down_from_budget() {
        let mut session = start(&quiz_def(1, 100));
        assert_eq!(session.remaining(), Some(QUIZ_TIME_LIMIT));
        session.tick();
        assert_eq!(session.remaining(), Some(QUIZ_TIME_LIMIT - 1));
        assert_eq!(session.snapshot().clock.as_deref(), Some("4:59"));
    }

    #[test]
    fn timeout_aborts_exactly_once() {
        let mut d = quiz_def(3, 100);
        d.time_limit = Some(5);
        let mut session = start(&d);
        answer(&mut session, &[0]);
        for _ in 0..5 {
            assert!(session.tick());
        }
        assert_eq!(session.status(), SessionStatus::Aborted { reason: AbortReason::TimedOut });
        for _ in 0..10 {
            assert!(!session.tick());
        }
        let timed_out = session
            .events()
            .iter()
            .filter(|e| e.kind == SessionEvent::TIMED_OUT)
            .count();
        assert_eq!(timed_out, 1);

        let result = session.result().unwrap();
        assert_eq!(result.outcome, Outcome::TimedOut);
        assert!(!result.completed);
        assert_eq!(result.score, 1);
        assert_eq!(result.remaining, Some(0));
    }

    #[test]
    fn timed_out_session_rejects_actions_and_is_not_reported() {
        let mut d = quiz_def(2, 100);
        d.time_limit = Some(1);
        let mut session = start(&d);
        session.tick();
        assert!(session.select_answer(0).unwrap_err().is_illegal_operation());
        let mut store = store_with_student();
        assert_eq!(session.report(&mut store).unwrap(), None);
        assert_eq!(store.user().unwrap().total_points, 0);
    }

    #[test]
    fn finished_session_reports_once() {
        let mut session = start(&quiz_def(3, 100));
        answer(&mut session, &[0, 0, 0]);
        let mut store = store_with_student();
        let first = session.report(&mut store).unwrap().unwrap();
        assert_eq!(first.points_earned, 100);
        assert_eq!(first.rating, Rating::Excellent);
        assert_eq!(session.report(&mut store).unwrap(), None);
        let user = store.user().unwrap();
        assert_eq!(user.total_points, 100);
        assert_eq!(user.games_completed, 1);
    }

    #[test]
    fn failed_report_can_be_retried() {
        let mut session = start(&quiz_def(1, 100));
        answer(&mut session, &[0]);
        let mut empty = MemoryStore::new();
        assert!(matches!(session.report(&mut empty), Err(StoreError::NoUser)));
        assert!(!session.is_reported());
        let mut store = store_with_student();
        assert!(session.report(&mut store).unwrap().is_some());
    }

    #[test]
    fn abandoned_session_has_no_result() {
        let mut session = start(&quiz_def(3, 100));
        answer(&mut session, &[0]);
        session.abandon();
        assert_eq!(session.status(), SessionStatus::Aborted { reason: AbortReason::Abandoned });
        assert_eq!(session.result(), None);
        assert!(!session.tick());
        let mut store = store_with_student();
        assert_eq!(session.report(&mut store).unwrap(), None);
    }

    #[test]
    fn abandon_after_finish_keeps_result() {
        let mut session = start(&quiz_def(1, 100));
        answer(&mut session, &[0]);
        session.abandon();
        assert_eq!(session.status(), SessionStatus::Finished);
        assert!(session.result().is_some());
    }

    #[test]
    fn created_session_rejects_actions() {
        let d = quiz_def(1, 100);
        let machine = ModeRegistry::default().build(&d).unwrap();
        let mut session = GameSession::new(&d, machine);
        assert_eq!(session.status(), SessionStatus::Created);
        assert!(session.select_answer(0).is_err());
        assert!(!session.tick());
        session.start().unwrap();
        assert!(session.start().is_err());
        assert!(session.select_answer(0).is_ok());
    }

    #[test]
    fn word_hunt_finishes_on_full_set() {
        let d = def(
            "sci-hunt-1",
            GameMode::WordHunt,
            80,
            GameContent::WordHunt(WordHuntContent {
                grid: vec!["ATOMXX".into(), "MOLECU".into(), "LEXXXX".into()],
                words: vec!["ATOM".into(), "MOLECULE".into()],
            }),
        );
        let mut session = start(&d);
        assert_eq!(session.remaining(), None);
        for c in 0..6 {
            session.toggle_cell(1, c).unwrap();
        }
        session.toggle_cell(2, 0).unwrap();
        session.toggle_cell(2, 1).unwrap();
        session.check_selection().unwrap();
        assert!(session.is_running());
        for c in (0..4).rev() {
            session.toggle_cell(0, c).unwrap();
        }
        session.check_selection().unwrap();
        assert_eq!(session.status(), SessionStatus::Finished);
        let result = session.result().unwrap();
        assert_eq!(result.score, 30);
        assert_eq!(result.points_earned, 80);
    }

    #[test]
    fn word_hunt_finishes_in_either_order() {
        let d = def(
            "sci-hunt-1",
            GameMode::WordHunt,
            80,
            GameContent::WordHunt(WordHuntContent {
                grid: vec!["ATOMXX".into(), "MOLECU".into(), "LEXXXX".into()],
                words: vec!["ATOM".into(), "MOLECULE".into()],
            }),
        );
        let atom = [(0, 0), (0, 1), (0, 2), (0, 3)];
        let molecule = [(1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (2, 0), (2, 1)];
        for order in [[&atom[..], &molecule[..]], [&molecule[..], &atom[..]]] {
            let mut session = start(&d);
            for (i, cells) in order.iter().enumerate() {
                assert!(session.is_running(), "finished after {} words", i);
                for &(r, c) in cells.iter() {
                    session.toggle_cell(r, c).unwrap();
                }
                session.check_selection().unwrap();
            }
            assert_eq!(session.status(), SessionStatus::Finished);
            assert_eq!(session.result().unwrap().points_earned, 80);
        }
    }

    #[test]
    fn simulation_rejects_steps_after_finish() {
        let d = def(
            "sci-sim-1",
            GameMode::Simulation,
            200,
            GameContent::Simulation(SimulationContent {
                steps: vec![
                    StepDef { title: "Goggles".into(), description: String::new() },
                    StepDef { title: "Mix".into(), description: String::new() },
                ],
            }),
        );
        let mut session = start(&d);
        session.complete_current_step().unwrap();
        session.complete_current_step().unwrap();
        assert_eq!(session.status(), SessionStatus::Finished);
        assert!(session.complete_current_step().unwrap_err().is_illegal_operation());
        assert_eq!(session.score(), 40);
    }

    #[test]
    fn untimed_puzzle_never_times_out() {
        let d = def(
            "math-puzzle-1",
            GameMode::Puzzle,
            90,
            GameContent::Puzzle(PuzzleContent {
                size: 3,
                tiles: Some(vec![1, 2, 3, 4, 5, 6, 7, 0, 8]),
                seed: 1,
            }),
        );
        let mut session = start(&d);
        for _ in 0..1000 {
            session.tick();
        }
        assert!(session.is_running());
        assert_eq!(session.elapsed(), 1000);
        assert!(session.click_tile(0).is_err());
        session.click_tile(8).unwrap();
        let result = session.result().unwrap();
        assert_eq!(result.points_earned, 90);
        assert_eq!(result.elapsed, 1000);
        assert_eq!(result.remaining, None);
    }

    #[test]
    fn catalog_time_limit_overrides_mode() {
        let mut d = def(
            "sci-sim-1",
            GameMode::Simulation,
            200,
            GameContent::Simulation(SimulationContent {
                steps: vec![StepDef { title: "Goggles".into(), description: String::new() }],
            }),
        );
        d.time_limit = Some(90);
        assert_eq!(start(&d).remaining(), Some(90));
    }

    #[test]
    fn rejected_action_leaves_state() {
        let mut session = start(&quiz_def(2, 100));
        let before = session.snapshot();
        assert!(session.advance().is_err());
        assert!(session.click_tile(0).is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn snapshot_serializes_for_the_view() {
        let session = start(&quiz_def(1, 100));
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["status"]["state"], "running");
        assert_eq!(json["board"]["mode"], "quiz");
        assert_eq!(json["board"]["phase"]["phase"], "awaiting_answer");
        assert_eq!(json["remaining"], 300);
    }
}
