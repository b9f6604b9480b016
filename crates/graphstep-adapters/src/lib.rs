//! # graphstep-adapters
//!
//! Algorithm plugins for Graphstep.
//!
//! ## Modules
//!
//! - [`plugins`] - Step-machine algorithm implementations and their registry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod plugins;
