//! Word hunt: pick letters off a grid to spell the target words.
//!
//! Cells are matched by the letters they spell, not by where they sit. Any
//! set of cells whose letters read as a target word, forwards or backwards,
//! counts as a find.

use serde::{Deserialize, Serialize};

use crate::api::game::{MiniGame, ModeContext};
use crate::api::types::{GameMode, GridPos, SessionEvent};
use crate::error::SessionError;
use crate::input::queue::PlayerAction;
use crate::modes::{wrong_mode, ModeSnapshot};

/// Points awarded per target word found.
pub const WORD_BONUS: u32 = 15;

/// Catalog content block for `mode: "word-hunt"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordHuntContent {
    /// Grid rows, one character per cell. All rows must be the same length.
    pub grid: Vec<String>,
    pub words: Vec<String>,
}

/// Result of testing the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "word", rename_all = "snake_case")]
pub enum CheckOutcome {
    Found(String),
    AlreadyFound(String),
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordHuntSnapshot {
    pub grid: Vec<String>,
    pub words: Vec<String>,
    pub found: Vec<String>,
    pub selected: Vec<GridPos>,
    /// Letters spelled by the current selection.
    pub candidate: String,
    pub last_check: Option<CheckOutcome>,
    pub score: u32,
}

pub struct WordHuntGame {
    grid: Vec<Vec<char>>,
    words: Vec<String>,
    selected: Vec<GridPos>,
    /// Discovery order, no duplicates.
    found: Vec<String>,
    last_check: Option<CheckOutcome>,
}

impl WordHuntGame {
    pub fn new(content: &WordHuntContent) -> Result<Self, SessionError> {
        let grid: Vec<Vec<char>> = content.grid.iter().map(|row| row.chars().collect()).collect();
        let width = grid.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 {
            return Err(SessionError::invalid("word hunt grid is empty"));
        }
        if let Some(i) = grid.iter().position(|r| r.len() != width) {
            return Err(SessionError::invalid(format!(
                "word hunt grid is not rectangular: row {} has {} cells, expected {}",
                i,
                grid[i].len(),
                width
            )));
        }
        if content.words.is_empty() {
            return Err(SessionError::invalid("word hunt has no target words"));
        }
        for (i, word) in content.words.iter().enumerate() {
            if word.is_empty() {
                return Err(SessionError::invalid("word hunt target word is empty"));
            }
            if content.words[..i].contains(word) {
                return Err(SessionError::invalid(format!("duplicate target word `{}`", word)));
            }
        }
        Ok(Self {
            grid,
            words: content.words.clone(),
            selected: Vec::new(),
            found: Vec::new(),
            last_check: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid[0].len()
    }

    pub fn selected(&self) -> &[GridPos] {
        &self.selected
    }

    pub fn found(&self) -> &[String] {
        &self.found
    }

    /// Letters at the selected cells, in selection order.
    pub fn candidate(&self) -> String {
        self.selected.iter().map(|p| self.grid[p.row][p.col]).collect()
    }

    /// Add the cell to the selection, or remove it if already selected.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(SessionError::illegal(format!(
                "cell ({}, {}) is outside the {}x{} grid",
                row,
                col,
                self.rows(),
                self.cols()
            )));
        }
        let pos = GridPos::new(row, col);
        if let Some(i) = self.selected.iter().position(|p| *p == pos) {
            self.selected.remove(i);
        } else {
            self.selected.push(pos);
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Match the selection against the targets, as written or reversed.
    /// A new find clears the selection; anything else leaves it in place.
    ///
    /// An exact match wins over a reversed one, and a target not yet found
    /// wins over one already found, so a target that is another's reverse
    /// stays findable.
    pub fn check_selection(&mut self, ctx: &mut ModeContext) -> CheckOutcome {
        let candidate = self.candidate();
        let target = |reversed: bool| {
            self.words
                .iter()
                .find(|w| {
                    if reversed {
                        w.chars().rev().eq(candidate.chars())
                    } else {
                        **w == candidate
                    }
                })
                .cloned()
        };
        let exact = target(false);
        let reversed = target(true);
        let fresh = exact
            .iter()
            .chain(reversed.iter())
            .find(|w| !self.found.contains(*w))
            .cloned();

        let outcome = match (fresh, exact.or(reversed)) {
            (None, Some(word)) => CheckOutcome::AlreadyFound(word),
            (None, None) => CheckOutcome::NoMatch,
            (Some(word), _) => {
                self.found.push(word.clone());
                self.selected.clear();
                ctx.emit_event(SessionEvent::new(
                    SessionEvent::WORD_FOUND,
                    self.found.len() as f32,
                    self.score() as f32,
                    self.words.len() as f32,
                ));
                log::debug!("word hunt: found `{}` ({}/{})", word, self.found.len(), self.words.len());
                CheckOutcome::Found(word)
            }
        };
        self.last_check = Some(outcome.clone());
        outcome
    }
}

impl MiniGame for WordHuntGame {
    fn mode(&self) -> GameMode {
        GameMode::WordHunt
    }

    fn apply(&mut self, action: &PlayerAction, ctx: &mut ModeContext) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::illegal("all words already found"));
        }
        match *action {
            PlayerAction::ToggleCell { row, col } => self.toggle_cell(row, col),
            PlayerAction::CheckSelection => {
                self.check_selection(ctx);
                Ok(())
            }
            PlayerAction::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
            other => Err(wrong_mode(&other, GameMode::WordHunt)),
        }
    }

    fn score(&self) -> u32 {
        self.found.len() as u32 * WORD_BONUS
    }

    fn max_score(&self) -> u32 {
        self.words.len() as u32 * WORD_BONUS
    }

    fn is_finished(&self) -> bool {
        self.found.len() == self.words.len()
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot::WordHunt(WordHuntSnapshot {
            grid: self.grid.iter().map(|r| r.iter().collect()).collect(),
            words: self.words.clone(),
            found: self.found.clone(),
            selected: self.selected.clone(),
            candidate: self.candidate(),
            last_check: self.last_check.clone(),
            score: self.score(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ATOM across row 0, MOLECULE down column 4.
    fn chemistry() -> WordHuntGame {
        WordHuntGame::new(&WordHuntContent {
            grid: vec![
                "ATOMMX".into(),
                "QZKPOY".into(),
                "RBNSLW".into(),
                "VFJHEG".into(),
                "TDIRCK".into(),
                "NPBAUS".into(),
                "ZQWELT".into(),
                "YXVOEM".into(),
            ],
            words: vec!["ATOM".into(), "MOLECULE".into()],
        })
        .unwrap()
    }

    fn select(game: &mut WordHuntGame, cells: &[(usize, usize)]) {
        for &(r, c) in cells {
            game.toggle_cell(r, c).unwrap();
        }
    }

    fn molecule_cells() -> Vec<(usize, usize)> {
        (0..8).map(|r| (r, 4)).collect()
    }

    #[test]
    fn ragged_grid_is_invalid() {
        let err = WordHuntGame::new(&WordHuntContent {
            grid: vec!["ABC".into(), "DE".into()],
            words: vec!["AB".into()],
        })
        .err()
        .unwrap();
        assert!(matches!(err, SessionError::InvalidDefinition(_)));
    }

    #[test]
    fn duplicate_words_are_invalid() {
        assert!(WordHuntGame::new(&WordHuntContent {
            grid: vec!["ATOM".into()],
            words: vec!["ATOM".into(), "ATOM".into()],
        })
        .is_err());
    }

    #[test]
    fn toggle_removes_selected_cell() {
        let mut game = chemistry();
        select(&mut game, &[(0, 0), (0, 1), (0, 0)]);
        assert_eq!(game.selected(), &[GridPos::new(0, 1)]);
    }

    #[test]
    fn toggle_outside_grid_is_rejected() {
        let mut game = chemistry();
        assert!(game.toggle_cell(8, 0).unwrap_err().is_illegal_operation());
        assert!(game.toggle_cell(0, 6).unwrap_err().is_illegal_operation());
        assert!(game.selected().is_empty());
    }

    #[test]
    fn forward_match_scores_and_clears() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
        assert_eq!(game.score(), WORD_BONUS);
        assert!(game.selected().is_empty());
        assert_eq!(ctx.events()[0].kind, SessionEvent::WORD_FOUND);
    }

    #[test]
    fn reversed_match_counts() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
    }

    #[test]
    fn scattered_cells_still_match() {
        // M at (0,3), O at (1,4), T at (4,0), A at (5,3): reads MOTA, i.e. ATOM reversed.
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 3), (1, 4), (4, 0), (5, 3)]);
        assert_eq!(game.candidate(), "MOTA");
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
    }

    #[test]
    fn no_match_keeps_selection() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 0), (0, 1)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::NoMatch);
        assert_eq!(game.selected().len(), 2);
        assert_eq!(game.score(), 0);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn refinding_a_word_does_not_double_award() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        game.check_selection(&mut ctx);
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::AlreadyFound("ATOM".into()));
        assert_eq!(game.found().len(), 1);
        assert_eq!(game.score(), WORD_BONUS);
    }

    #[test]
    fn finishes_when_all_words_found_in_any_order() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &molecule_cells());
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("MOLECULE".into()));
        assert!(!game.is_finished());
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        game.check_selection(&mut ctx);
        assert!(game.is_finished());
        assert_eq!(game.score(), game.max_score());
    }

    #[test]
    fn finishes_with_atom_found_first() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
        assert!(!game.is_finished());
        select(&mut game, &molecule_cells());
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("MOLECULE".into()));
        assert!(game.is_finished());
        assert_eq!(game.found(), &["ATOM".to_string(), "MOLECULE".to_string()]);
    }

    #[test]
    fn mirrored_targets_are_both_findable() {
        let mut game = WordHuntGame::new(&WordHuntContent {
            grid: vec!["ATOM".into()],
            words: vec!["ATOM".into(), "MOTA".into()],
        })
        .unwrap();
        let mut ctx = ModeContext::default();

        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
        select(&mut game, &[(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("MOTA".into()));
        assert!(game.is_finished());

        // Reversed spelling first claims MOTA, the next one ATOM.
        let mut game = WordHuntGame::new(&WordHuntContent {
            grid: vec!["ATOM".into()],
            words: vec!["ATOM".into(), "MOTA".into()],
        })
        .unwrap();
        select(&mut game, &[(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("MOTA".into()));
        select(&mut game, &[(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::Found("ATOM".into()));
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(game.check_selection(&mut ctx), CheckOutcome::AlreadyFound("ATOM".into()));
        assert_eq!(game.found().len(), 2);
    }

    #[test]
    fn finished_hunt_rejects_actions() {
        let mut game = chemistry();
        let mut ctx = ModeContext::default();
        select(&mut game, &molecule_cells());
        game.check_selection(&mut ctx);
        select(&mut game, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        game.check_selection(&mut ctx);
        let err = game.apply(&PlayerAction::ToggleCell { row: 0, col: 0 }, &mut ctx).unwrap_err();
        assert!(err.is_illegal_operation());
    }
}
