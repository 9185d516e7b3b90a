/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The analysis lifecycle state machine (lifecycle.rs)

pub mod data;
pub mod lifecycle;
