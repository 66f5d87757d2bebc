//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod locations;
mod simulate;

pub use check_content::CheckContent;
pub use locations::Locations;
pub use simulate::Simulate;
