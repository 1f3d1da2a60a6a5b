//! Remote lookups feeding the profile snapshot.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod tasks;

pub use client::{DataSource, HttpSource};
pub use tasks::{spawn_all, Endpoints};
