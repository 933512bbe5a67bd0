//! Test harness for rig integration tests
//!
//! Provides fixture templates, a scripted fake tool, binary execution,
//! and custom assertions for scenario outcomes.

#![allow(dead_code)]

mod assertions;
mod runner;

pub use assertions::OutcomeAssertions;
pub use fixture::{fixtures_dir, Call, Sandbox};
pub use runner::{rig, rig_command, RunResult};
