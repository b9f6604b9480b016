//! Utility modules.
//!
//! - [`error`] - Error taxonomy shared by all crates
//! - [`hash`] - Hash set alias

pub mod error;
pub mod hash;
