//! Persistence slot backends for the content store.
//!
//! - [`FileSlot`] keeps each key in its own JSON file under a data directory.
//! - [`MemorySlot`] keeps values in a map; used by tests and ephemeral runs.

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;
