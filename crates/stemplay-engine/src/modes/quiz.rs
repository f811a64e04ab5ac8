use serde::{Deserialize, Serialize};

use crate::api::game::{MiniGame, ModeContext, SessionConfig};
use crate::api::types::{GameMode, SessionEvent};
use crate::error::SessionError;
use crate::input::queue::PlayerAction;
use crate::modes::{wrong_mode, ModeSnapshot};

/// Countdown budget for a quiz, in seconds.
pub const QUIZ_TIME_LIMIT: u32 = 300;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the single correct option.
    pub correct: usize,
    #[serde(default)]
    pub hint: String,
}

/// Catalog content block for `mode: "quiz"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizContent {
    pub questions: Vec<QuizQuestion>,
}

/// Quiz state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    AwaitingAnswer { question: usize },
    AnswerSelected { question: usize, choice: usize },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    /// 1-based question number for display; equals `total` once finished.
    pub question_number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    /// Hint text, present only while the hint is shown.
    pub hint: Option<String>,
    pub correct: u32,
}

pub struct QuizGame {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    correct: u32,
    hint_visible: bool,
}

impl QuizGame {
    pub fn new(content: &QuizContent) -> Result<Self, SessionError> {
        if content.questions.is_empty() {
            return Err(SessionError::invalid("quiz has no questions"));
        }
        for (i, q) in content.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(SessionError::invalid(format!(
                    "question {} has {} options, need at least 2",
                    i + 1,
                    q.options.len()
                )));
            }
            if q.correct >= q.options.len() {
                return Err(SessionError::invalid(format!(
                    "question {} marks option {} correct but has only {}",
                    i + 1,
                    q.correct,
                    q.options.len()
                )));
            }
        }
        Ok(Self {
            questions: content.questions.clone(),
            phase: QuizPhase::AwaitingAnswer { question: 0 },
            correct: 0,
            hint_visible: false,
        })
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Index of the question on screen. Stays on the last question once finished.
    pub fn current_index(&self) -> usize {
        match self.phase {
            QuizPhase::AwaitingAnswer { question } | QuizPhase::AnswerSelected { question, .. } => {
                question
            }
            QuizPhase::Finished => self.questions.len() - 1,
        }
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index()]
    }

    pub fn selected(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::AnswerSelected { choice, .. } => Some(choice),
            _ => None,
        }
    }

    pub fn select_answer(&mut self, choice: usize) -> Result<(), SessionError> {
        let question = match self.phase {
            QuizPhase::AwaitingAnswer { question } | QuizPhase::AnswerSelected { question, .. } => {
                question
            }
            QuizPhase::Finished => return Err(SessionError::illegal("quiz is already finished")),
        };
        let options = self.questions[question].options.len();
        if choice >= options {
            return Err(SessionError::illegal(format!(
                "choice {} out of range, question has {} options",
                choice, options
            )));
        }
        self.phase = QuizPhase::AnswerSelected { question, choice };
        Ok(())
    }

    /// Grade the current selection and move to the next question.
    /// Returns whether the answer was correct.
    pub fn advance(&mut self, ctx: &mut ModeContext) -> Result<bool, SessionError> {
        let (question, choice) = match self.phase {
            QuizPhase::AnswerSelected { question, choice } => (question, choice),
            QuizPhase::AwaitingAnswer { .. } => {
                return Err(SessionError::illegal("no answer selected"))
            }
            QuizPhase::Finished => return Err(SessionError::illegal("quiz is already finished")),
        };

        let is_correct = choice == self.questions[question].correct;
        if is_correct {
            self.correct += 1;
        }
        ctx.emit_event(SessionEvent::new(
            SessionEvent::ANSWER_CHECKED,
            question as f32,
            if is_correct { 1.0 } else { 0.0 },
            self.correct as f32,
        ));

        self.hint_visible = false;
        self.phase = if question + 1 < self.questions.len() {
            QuizPhase::AwaitingAnswer { question: question + 1 }
        } else {
            QuizPhase::Finished
        };
        Ok(is_correct)
    }

    pub fn toggle_hint(&mut self) -> Result<(), SessionError> {
        if self.phase == QuizPhase::Finished {
            return Err(SessionError::illegal("quiz is already finished"));
        }
        self.hint_visible = !self.hint_visible;
        Ok(())
    }
}

impl MiniGame for QuizGame {
    fn mode(&self) -> GameMode {
        GameMode::Quiz
    }

    fn config(&self) -> SessionConfig {
        SessionConfig {
            time_limit: Some(QUIZ_TIME_LIMIT),
            ..SessionConfig::default()
        }
    }

    fn apply(&mut self, action: &PlayerAction, ctx: &mut ModeContext) -> Result<(), SessionError> {
        match *action {
            PlayerAction::SelectAnswer { choice } => self.select_answer(choice),
            PlayerAction::Advance => self.advance(ctx).map(|_| ()),
            PlayerAction::ToggleHint => self.toggle_hint(),
            other => Err(wrong_mode(&other, GameMode::Quiz)),
        }
    }

    fn score(&self) -> u32 {
        self.correct
    }

    fn max_score(&self) -> u32 {
        self.questions.len() as u32
    }

    fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    fn snapshot(&self) -> ModeSnapshot {
        let q = self.current_question();
        ModeSnapshot::Quiz(QuizSnapshot {
            phase: self.phase,
            question_number: self.current_index() + 1,
            total: self.total(),
            prompt: q.question.clone(),
            options: q.options.clone(),
            selected: self.selected(),
            hint: self.hint_visible.then(|| q.hint.clone()),
            correct: self.correct,
        })
    }
}
