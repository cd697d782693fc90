//! The shared site context: current snapshot, edits, admin mode, navigation.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;

use crate::capability::AdminGate;
use crate::content::Snapshot;
use crate::content_store::ContentStore;
use crate::page::{Navigator, PageId};
use crate::slot::SlotError;

/// Why the snapshot revision moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// Initial load at startup.
    Loaded,
    /// An edit replaced the snapshot; a re-render is enough.
    Updated,
    /// A reset discarded in-memory state; renderers must start over.
    Reloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub number: u64,
    pub change: ContentChange,
}

/// Application state established once by the root and shared by reference.
pub struct SiteContext {
    store: ContentStore,
    snapshot: RwLock<Arc<Snapshot>>,
    /// Serializes writers so persisted order matches in-memory order.
    writes: Mutex<()>,
    admin: Arc<dyn AdminGate>,
    navigator: Navigator,
    revision: watch::Sender<Revision>,
}

pub type SharedContext = Arc<SiteContext>;

impl SiteContext {
    /// Load the snapshot and derive the initial page from `initial_fragment`.
    pub fn establish(
        store: ContentStore,
        admin: Arc<dyn AdminGate>,
        initial_fragment: &str,
    ) -> SharedContext {
        let snapshot = store.load();
        let navigator = Navigator::new(initial_fragment);
        let (revision, _) = watch::channel(Revision {
            number: 0,
            change: ContentChange::Loaded,
        });

        tracing::info!(
            key = store.key(),
            page = %navigator.current(),
            books = snapshot.books.len(),
            authors = snapshot.authors.len(),
            "site context established"
        );

        Arc::new(Self {
            store,
            snapshot: RwLock::new(Arc::new(snapshot)),
            writes: Mutex::new(()),
            admin,
            navigator,
            revision,
        })
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot and persist it.
    ///
    /// The in-memory value is swapped before the write, so the running site
    /// shows the edit even if persisting fails. Readers are not blocked
    /// while the slot writes.
    pub fn update(&self, next: Snapshot) -> Result<(), SlotError> {
        let _writing = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(next);
        self.swap(next.clone(), ContentChange::Updated);
        self.store.save(&next)
    }

    /// Apply `edit` to a copy of the current snapshot and store the result.
    pub fn edit(&self, edit: impl FnOnce(&mut Snapshot)) -> Result<Arc<Snapshot>, SlotError> {
        let _writing = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Snapshot::clone(&self.snapshot());
        edit(&mut next);
        let next = Arc::new(next);
        self.swap(next.clone(), ContentChange::Updated);
        self.store.save(&next)?;
        Ok(next)
    }

    /// Revert to the bundled default, navigate home, and reload everything
    /// from the slot. Admin mode does not survive a reload.
    pub fn reset(&self) -> Result<(), SlotError> {
        let _writing = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.reset()?;
        let reloaded = Arc::new(self.store.load());
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = reloaded;
        self.admin.set_admin(false);
        self.navigator.navigate(PageId::Home);
        self.bump(ContentChange::Reloaded);
        Ok(())
    }

    pub fn can_edit(&self) -> bool {
        self.admin.can_edit()
    }

    pub fn set_admin(&self, enabled: bool) -> bool {
        let state = self.admin.set_admin(enabled);
        tracing::info!(requested = enabled, admin = state, "admin mode changed");
        state
    }

    pub fn toggle_admin(&self) -> bool {
        let state = self.admin.toggle();
        tracing::info!(admin = state, "admin mode toggled");
        state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn revision(&self) -> Revision {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.revision.subscribe()
    }

    fn swap(&self, next: Arc<Snapshot>, change: ContentChange) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;
        self.bump(change);
    }

    fn bump(&self, change: ContentChange) {
        self.revision.send_modify(|revision| {
            revision.number += 1;
            revision.change = change;
        });
    }
}
