//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod fields;
pub mod geometry;
pub mod mc;
pub mod medium;
pub mod parallel;
pub mod photon;
pub mod pool;
pub mod recorder;
pub mod rng;
pub mod sampling;
pub mod stats;
