//! Cross-subsystem integration tests.

pub mod harness;
pub mod pipeline;
pub mod resilience;
pub mod views;
