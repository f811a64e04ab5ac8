use serde::{Deserialize, Serialize};

use crate::api::game::{MiniGame, ModeContext};
use crate::api::types::{GameMode, SessionEvent};
use crate::error::SessionError;
use crate::input::queue::PlayerAction;
use crate::modes::{wrong_mode, ModeSnapshot};

/// Points awarded per completed step.
pub const STEP_BONUS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDef {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Catalog content block for `mode: "simulation"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationContent {
    pub steps: Vec<StepDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStep {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub steps: Vec<SimulationStep>,
    /// Index of the step in progress; equals `steps.len()` once all are done.
    pub current_step: usize,
    pub score: u32,
}

/// Guided lab procedure: steps are completed strictly in order, never undone.
pub struct LabSimulation {
    steps: Vec<SimulationStep>,
    current: usize,
}

impl LabSimulation {
    pub fn new(content: &SimulationContent) -> Result<Self, SessionError> {
        if content.steps.is_empty() {
            return Err(SessionError::invalid("simulation has no steps"));
        }
        let steps = content
            .steps
            .iter()
            .map(|s| SimulationStep {
                title: s.title.clone(),
                description: s.description.clone(),
                completed: false,
            })
            .collect();
        Ok(Self { steps, current: 0 })
    }

    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn complete_current_step(&mut self, ctx: &mut ModeContext) -> Result<(), SessionError> {
        let Some(step) = self.steps.get_mut(self.current) else {
            return Err(SessionError::illegal("all simulation steps are already complete"));
        };
        step.completed = true;
        log::debug!("simulation: step {} `{}` complete", self.current + 1, step.title);
        self.current += 1;
        ctx.emit_event(SessionEvent::new(
            SessionEvent::STEP_COMPLETED,
            (self.current - 1) as f32,
            self.score() as f32,
            0.0,
        ));
        Ok(())
    }
}

impl MiniGame for LabSimulation {
    fn mode(&self) -> GameMode {
        GameMode::Simulation
    }

    fn apply(&mut self, action: &PlayerAction, ctx: &mut ModeContext) -> Result<(), SessionError> {
        match *action {
            PlayerAction::CompleteStep => self.complete_current_step(ctx),
            other => Err(wrong_mode(&other, GameMode::Simulation)),
        }
    }

    fn score(&self) -> u32 {
        self.current as u32 * STEP_BONUS
    }

    fn max_score(&self) -> u32 {
        self.steps.len() as u32 * STEP_BONUS
    }

    fn is_finished(&self) -> bool {
        self.current == self.steps.len()
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot::Simulation(SimulationSnapshot {
            steps: self.steps.clone(),
            current_step: self.current,
            score: self.score(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab() -> LabSimulation {
        LabSimulation::new(&SimulationContent {
            steps: ["Put on goggles", "Measure 50 ml vinegar", "Add baking soda"]
                .iter()
                .map(|t| StepDef { title: t.to_string(), description: String::new() })
                .collect(),
        })
        .unwrap()
    }

    #[test]
    fn no_steps_is_invalid() {
        assert!(LabSimulation::new(&SimulationContent { steps: vec![] }).is_err());
    }

    #[test]
    fn steps_complete_in_order() {
        let mut sim = lab();
        let mut ctx = ModeContext::default();
        sim.complete_current_step(&mut ctx).unwrap();
        assert!(sim.steps()[0].completed);
        assert!(!sim.steps()[1].completed);
        assert_eq!(sim.current_step(), 1);
        assert_eq!(sim.score(), STEP_BONUS);
    }

    #[test]
    fn last_step_finishes() {
        let mut sim = lab();
        let mut ctx = ModeContext::default();
        for _ in 0..3 {
            sim.complete_current_step(&mut ctx).unwrap();
        }
        assert!(sim.is_finished());
        assert_eq!(sim.score(), sim.max_score());
        assert_eq!(ctx.events().len(), 3);
    }

    #[test]
    fn completing_after_finish_is_rejected() {
        let mut sim = lab();
        let mut ctx = ModeContext::default();
        for _ in 0..3 {
            sim.complete_current_step(&mut ctx).unwrap();
        }
        let err = sim.complete_current_step(&mut ctx).unwrap_err();
        assert!(err.is_illegal_operation());
        assert_eq!(sim.score(), 3 * STEP_BONUS);
    }
}
