use crate::api::types::{GameMode, SessionEvent};
use crate::error::SessionError;
use crate::input::queue::PlayerAction;
use crate::modes::ModeSnapshot;

/// Configuration for a session, provided by the sub-machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Countdown budget in time units. `None` runs untimed (default).
    pub time_limit: Option<u32>,
    /// Wall-clock seconds per countdown unit (default: 1.0).
    pub unit_seconds: f32,
    /// Maximum number of session events per frame (default: 32).
    pub max_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            unit_seconds: 1.0,
            max_events: 32,
        }
    }
}

/// The contract every mini-game mode must fulfill.
///
/// A sub-machine owns all session-local state for its mode. `apply` either
/// performs a legal transition or returns `IllegalOperation` and leaves the
/// state untouched; the dispatcher relies on that to keep rejected calls
/// side-effect free.
pub trait MiniGame {
    fn mode(&self) -> GameMode;

    /// Return session configuration. Called once when the session is built.
    fn config(&self) -> SessionConfig {
        SessionConfig::default()
    }

    /// Apply one player action.
    fn apply(&mut self, action: &PlayerAction, ctx: &mut ModeContext) -> Result<(), SessionError>;

    /// Score accrued so far.
    fn score(&self) -> u32;

    /// Score of a perfect run. Always > 0 for a valid game.
    fn max_score(&self) -> u32;

    /// Whether the mode's own completion rule has been met.
    fn is_finished(&self) -> bool;

    /// Serializable view of the board for rendering.
    fn snapshot(&self) -> ModeSnapshot;
}

/// Mutable per-session scratch passed to `MiniGame::apply`.
pub struct ModeContext {
    events: Vec<SessionEvent>,
    max_events: usize,
}

impl ModeContext {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::with_capacity(max_events),
            max_events,
        }
    }

    /// Emit a session event to be forwarded to the view layer.
    /// Events past the per-frame cap are dropped.
    pub fn emit_event(&mut self, event: SessionEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("event cap {} reached, dropping kind {}", self.max_events, event.kind);
        }
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for ModeContext {
    fn default() -> Self {
        Self::new(SessionConfig::default().max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_capped_per_frame() {
        let mut ctx = ModeContext::new(2);
        for i in 0..5 {
            ctx.emit_event(SessionEvent::new(SessionEvent::TILE_MOVED, i as f32, 0.0, 0.0));
        }
        assert_eq!(ctx.events().len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events().is_empty());
    }
}
