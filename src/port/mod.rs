//! Trait definitions (hexagonal ports). Depend on domain types and crate errors only.
//!
//! # Available Ports
//!
//! - [`RoundSource`] - Supplies the open round (events and turnover)

pub mod outbound;

pub use outbound::RoundSource;
