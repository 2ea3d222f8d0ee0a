//! Outbound adapters (driven side).

pub mod draw;
