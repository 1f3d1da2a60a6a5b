//! Analysis modules.
//!
//! Derivations applied to fetched records before they reach the snapshot.

pub mod stats;

pub use stats::*;
