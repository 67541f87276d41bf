//! Sketchpad application shell.
//!
//! Configuration loading and scripted replay shared by the `sketchpad`
//! binary and its tests.

pub mod config;
pub mod script;

pub use config::AppConfig;
pub use script::{Replayer, Step};
