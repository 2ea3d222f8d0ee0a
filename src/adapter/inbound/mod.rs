//! Inbound adapters: ways an operator drives the optimizer.

pub mod cli;
