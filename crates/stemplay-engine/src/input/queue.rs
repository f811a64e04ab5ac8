use crate::api::types::GameMode;

/// Player actions the session engine understands.
/// Each variant belongs to exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Quiz: pick an option for the current question (overwrites any earlier pick).
    SelectAnswer { choice: usize },
    /// Quiz: grade the current pick and move on.
    Advance,
    /// Quiz: show or hide the hint. Cosmetic.
    ToggleHint,
    /// Word hunt: add or remove a cell from the selection.
    ToggleCell { row: usize, col: usize },
    /// Word hunt: test the selection against the target words.
    CheckSelection,
    /// Word hunt: drop the current selection.
    ClearSelection,
    /// Sliding puzzle: slide the tile at `index` into the empty slot.
    ClickTile { index: usize },
    /// Sliding puzzle: re-scramble the board.
    Shuffle,
    /// Simulation: finish the current step.
    CompleteStep,
}

impl PlayerAction {
    /// The mode this action is addressed to.
    pub fn mode(&self) -> GameMode {
        match self {
            PlayerAction::SelectAnswer { .. } | PlayerAction::Advance | PlayerAction::ToggleHint => {
                GameMode::Quiz
            }
            PlayerAction::ToggleCell { .. }
            | PlayerAction::CheckSelection
            | PlayerAction::ClearSelection => GameMode::WordHunt,
            PlayerAction::ClickTile { .. } | PlayerAction::Shuffle => GameMode::Puzzle,
            PlayerAction::CompleteStep => GameMode::Simulation,
        }
    }
}

/// A queue of player actions.
/// The view layer pushes actions; the runner drains them each frame.
pub struct ActionQueue {
    actions: Vec<PlayerAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }

    /// Drain all pending actions in arrival order.
    pub fn drain(&mut self) -> Vec<PlayerAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerAction> {
        self.actions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = ActionQueue::new();
        q.push(PlayerAction::SelectAnswer { choice: 2 });
        q.push(PlayerAction::Advance);
        assert_eq!(q.len(), 2);
        let actions = q.drain();
        assert_eq!(actions, vec![PlayerAction::SelectAnswer { choice: 2 }, PlayerAction::Advance]);
        assert!(q.is_empty());
    }

    #[test]
    fn actions_know_their_mode() {
        assert_eq!(PlayerAction::ToggleHint.mode(), GameMode::Quiz);
        assert_eq!(PlayerAction::ToggleCell { row: 0, col: 1 }.mode(), GameMode::WordHunt);
        assert_eq!(PlayerAction::Shuffle.mode(), GameMode::Puzzle);
        assert_eq!(PlayerAction::CompleteStep.mode(), GameMode::Simulation);
    }
}
