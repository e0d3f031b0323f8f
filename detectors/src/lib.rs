//! Detectors

mod circular;

// Re-export
pub use circular::*;
