//! Absorbing regions

mod cylinder;
mod sphere;

// Re-export
pub use cylinder::*;
pub use sphere::*;
