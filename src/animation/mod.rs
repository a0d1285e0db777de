// Animation playback module

pub mod controller;
pub mod engine;
pub mod system;
pub mod types;

pub use controller::*;
pub use engine::*;
pub use system::ClipEngine;
pub use types::*;
