//! Outbound ports: what the application needs from the outside world.

mod round;

pub use round::RoundSource;
