//! Domain logic for the simulated feed.

pub mod generator;
