//! End-to-end scenario harness for the dotnet CLI
//!
//! Copies fixture projects into isolated temp roots, drives the tool through
//! restore/build/run/publish, and reports each scenario as pass/fail with
//! enough detail to reproduce a failing step by hand.

pub mod args;
pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod output;
pub mod paths;
pub mod platform;
pub mod scenario;
pub mod util;

pub use error::{Result, RigError};
