//! Grid-backed acoustic fields

mod displacement;
mod pressure;
mod voxel;

// Re-export
pub use displacement::*;
pub use pressure::*;
pub use voxel::*;
