//! The capability check guarding content edits.

/// Decides whether the current session may edit content.
///
/// Page handlers only ever ask [`AdminGate::can_edit`], so a credentialed
/// implementation can replace the demo toggle without touching them.
pub trait AdminGate: Send + Sync {
    fn can_edit(&self) -> bool;

    /// Request admin mode on or off. Returns the resulting state, which may
    /// differ from the request when the gate refuses.
    fn set_admin(&self, enabled: bool) -> bool;

    fn toggle(&self) -> bool {
        self.set_admin(!self.can_edit())
    }
}
