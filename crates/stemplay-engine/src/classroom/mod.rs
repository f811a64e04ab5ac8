//! Teacher-side data and the study assistant. No engine dependencies.

pub mod assistant;
pub mod roster;
