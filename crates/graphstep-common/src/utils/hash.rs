//! Hash set alias.
//!
//! Algorithms never iterate these to produce output; ordering-sensitive
//! state lives in index-addressed vectors instead.

/// Fast hash set used for membership lookups.
pub type FxHashSet<T> = hashbrown::HashSet<T, ahash::RandomState>;
