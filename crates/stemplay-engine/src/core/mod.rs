pub mod registry;
pub mod rng;
pub mod session;
pub mod time;
