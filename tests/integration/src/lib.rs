//! Integration test utilities for the Tally API
//!
//! Spawns the real server on a local port and seeds workspaces straight
//! through the repositories.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
