//! Autotile engine with focused sub-modules
//!
//! This module organizes the tiling coordinator into focused areas:
//! - Core: engine state, algorithm selection, and the retile pipeline
//! - Events: window and screen event handling from the compositor glue
//! - Commands: user-triggered operations (swap, promote, focus, ratios)

// Re-export the main public interface
pub use core::{AutotileEngine, EngineEvent, ScreenManager};

// Internal modules
mod commands;
mod core;
mod events;
