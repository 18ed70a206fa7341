//! Launcher configuration

pub mod launcher;

pub use launcher::*;
