//! # graphstep-engine
//!
//! The main entry point for Graphstep: owns the live graph, applies edits,
//! and drives algorithm runs one step at a time.
//!
//! ## Modules
//!
//! - [`engine`] - `StepEngine` and run lifecycle management
//! - [`run`] - The lazy snapshot sequence of a single run
//! - [`config`] - Configuration options

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod run;

pub use config::{Config, RunOptions};
pub use engine::StepEngine;
pub use run::{CancelHandle, Run};
