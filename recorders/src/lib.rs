//! Output recorders

#[macro_use]
extern crate log;

mod file;
mod memory;

// Re-export
pub use file::*;
pub use memory::*;
