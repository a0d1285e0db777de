// Orbit camera module

pub mod controller;
pub mod state;

pub use controller::*;
pub use state::*;
