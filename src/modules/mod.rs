pub mod cms;
pub mod forms;
pub mod site;

use wrp_kernel::settings::Settings;
use wrp_kernel::ModuleRegistry;

/// Register all site modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    registry.register(site::create_module());
    registry.register(cms::create_module());
    registry.register(forms::create_module(&settings.forms)?);
    Ok(())
}
