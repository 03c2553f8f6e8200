/// State management module
///
/// This module handles all application state:
/// - Shared data structures (data.rs)
/// - The restoration workflow state machine (session.rs)

pub mod data;
pub mod session;
