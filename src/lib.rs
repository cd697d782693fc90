//! Willow Rune Press site application.
//!
//! Wires the content store, admin gate and navigator into a shared
//! [`SiteContext`](wrp_kernel::SiteContext) and registers the site modules.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use wrp_kernel::settings::Settings;
use wrp_kernel::{ContentStore, ModuleRegistry, SharedContext, SiteContext};
use wrp_store::FileSlot;

pub use modules::register_all;

/// Open the configured content store on disk.
pub fn open_store(settings: &Settings) -> anyhow::Result<ContentStore> {
    let slot = FileSlot::open(&settings.storage.data_dir).with_context(|| {
        format!(
            "failed to open data directory {}",
            settings.storage.data_dir.display()
        )
    })?;
    Ok(ContentStore::new(Arc::new(slot), settings.storage.key.clone()))
}

/// Build the shared site context from settings.
pub fn establish_site(settings: &Settings) -> anyhow::Result<SharedContext> {
    let store = open_store(settings)?;
    let gate = wrp_authz::gate_from_settings(&settings.admin);
    Ok(SiteContext::establish(
        store,
        gate,
        &settings.server.initial_fragment,
    ))
}

/// Registry with every site module registered.
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry, settings)?;
    Ok(registry)
}
