//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for events and small rounds.
//! - [`config`] - Canonical annealing and estimator configurations.
//! - [`draw`] - Draw-list JSON documents in the provider's format.

pub mod config;
pub mod domain;
pub mod draw;
