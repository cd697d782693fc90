//! Admin capability gates.
//!
//! The site only asks [`AdminGate::can_edit`]; the gate chosen here decides
//! what that means. [`DemoToggle`] reproduces the footer "Admin Login" link:
//! a plain switch with no credential check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wrp_kernel::settings::{AdminMode, AdminSettings};
use wrp_kernel::AdminGate;

/// Admin mode as a plain boolean anyone can flip.
#[derive(Debug, Default)]
pub struct DemoToggle {
    enabled: AtomicBool,
}

impl DemoToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }
}

impl AdminGate for DemoToggle {
    fn can_edit(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_admin(&self, enabled: bool) -> bool {
        self.enabled.store(enabled, Ordering::SeqCst);
        enabled
    }
}

/// A gate that never grants admin mode.
#[derive(Debug, Default)]
pub struct Locked;

impl AdminGate for Locked {
    fn can_edit(&self) -> bool {
        false
    }

    fn set_admin(&self, enabled: bool) -> bool {
        if enabled {
            tracing::warn!("admin mode requested but editing is disabled");
        }
        false
    }
}

/// Build the gate selected by configuration.
pub fn gate_from_settings(settings: &AdminSettings) -> Arc<dyn AdminGate> {
    match settings.mode {
        AdminMode::DemoToggle => {
            tracing::warn!("admin mode is a demo toggle with no credential check");
            Arc::new(DemoToggle::default())
        }
        AdminMode::Disabled => Arc::new(Locked),
    }
}
