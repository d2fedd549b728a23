//! Frame-synchronous visual search task.
//!
//! A fixed set of items blink on and off at random places; now and then one
//! of them comes back briefly as the target. The viewer clicks once when they
//! spot it and once more where it was.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod headless;
pub mod search;
pub mod ui;
