//! Core of the Willow Rune site: the content model and store, page routing,
//! the shared site context, settings, and the module registry.

pub mod capability;
pub mod content;
pub mod content_store;
pub mod context;
pub mod module;
pub mod page;
pub mod registry;
pub mod settings;
pub mod slot;

#[cfg(test)]
mod testing;

pub use capability::AdminGate;
pub use content::Snapshot;
pub use content_store::ContentStore;
pub use context::{ContentChange, SharedContext, SiteContext};
pub use module::{InitCtx, Module};
pub use page::{Navigator, PageId};
pub use registry::ModuleRegistry;
pub use slot::{PersistenceSlot, SlotError};
