//! # Trajectory
//!
//! Cleans and segments a batch of GPS samples of a single vehicle moving around a
//! bounded facility (short update interval, noisy fixes).
//!
//! Stages:
//!
//! - [`drift`] - rejects fixes implying impossible speed, acceleration or heading change
//! - [`movement`] - labels each sample `Stationary`/`Moving` with a windowed hysteresis
//! - [`trip`] - finds the latest one or two `stationary -> moving -> stationary` cycles
//! - [`simplify`] - drops points too close to their predecessor
//!
//! [`pipeline::analyze`] runs all of them in order.

mod error;
#[cfg(test)]
mod fixtures;
mod models;

pub mod drift;
pub mod geometry;
pub mod movement;
pub mod options;
pub mod pairing;
pub mod pipeline;
pub mod simplify;
pub mod trip;

pub use error::*;
pub use models::*;
pub use options::*;
pub use pipeline::{Analysis, analyze};
