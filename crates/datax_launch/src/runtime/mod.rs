//! Runtime components for rendering and supervising the engine

pub mod command;
pub mod orchestrator;
pub mod process;

pub use command::*;
pub use orchestrator::*;
pub use process::*;
