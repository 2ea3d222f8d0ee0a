//! Application services (use cases).
//!
//! The solver is pure and synchronous; [`search`] runs it on tokio's
//! blocking pool for the CLI.

pub mod search;
pub mod solver;
