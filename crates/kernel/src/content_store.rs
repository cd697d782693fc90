//! Load, save, and reset the content snapshot against a persistence slot.

use std::sync::Arc;

use crate::content::{self, bundled_default, Decoded, Snapshot, SCHEMA_VERSION};
use crate::slot::{PersistenceSlot, SlotError};

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "wrp_cms_data_v1";

/// Single source of truth for the persisted snapshot.
#[derive(Clone)]
pub struct ContentStore {
    slot: Arc<dyn PersistenceSlot>,
    key: String,
}

impl ContentStore {
    pub fn new(slot: Arc<dyn PersistenceSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted snapshot, or the bundled default when nothing
    /// usable is stored. Never fails: read and parse errors count as absence.
    pub fn load(&self) -> Snapshot {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted snapshot; using bundled default");
                return bundled_default();
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "persisted snapshot unreadable; using bundled default");
                return bundled_default();
            }
        };

        match content::decode(&raw) {
            Ok(Decoded::Current(snapshot)) => snapshot,
            Ok(Decoded::Upgraded { from, snapshot }) => {
                tracing::info!(
                    key = %self.key,
                    from,
                    to = SCHEMA_VERSION,
                    "upgraded persisted snapshot"
                );
                if let Err(error) = self.save(&snapshot) {
                    tracing::warn!(key = %self.key, %error, "failed to write upgraded snapshot back");
                }
                snapshot
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "discarding persisted snapshot; using bundled default");
                bundled_default()
            }
        }
    }

    /// Persist `snapshot` as the new canonical value.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SlotError> {
        let encoded = content::encode(snapshot)?;
        self.slot.write(&self.key, &encoded)?;
        tracing::debug!(key = %self.key, bytes = encoded.len(), "snapshot persisted");
        Ok(())
    }

    /// Delete the persisted value and re-persist the bundled default.
    pub fn reset(&self) -> Result<Snapshot, SlotError> {
        let existed = self.slot.remove(&self.key)?;
        let snapshot = bundled_default();
        self.save(&snapshot)?;
        tracing::info!(key = %self.key, existed, "content reset to bundled default");
        Ok(snapshot)
    }

    /// The raw persisted value, if any.
    pub fn persisted(&self) -> Result<Option<String>, SlotError> {
        self.slot.read(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapSlot;

    fn store() -> (Arc<MapSlot>, ContentStore) {
        let slot = Arc::new(MapSlot::default());
        let store = ContentStore::new(slot.clone(), DEFAULT_STORAGE_KEY);
        (slot, store)
    }

    fn edited() -> Snapshot {
        let mut snapshot = bundled_default();
        snapshot.settings.site_name = "Rune & Willow".to_string();
        snapshot.authors.truncate(1);
        snapshot
    }

    #[test]
    fn load_without_persisted_value_yields_default() {
        let (_, store) = store();
        assert_eq!(store.load(), bundled_default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, store) = store();
        let snapshot = edited();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn full_precision_prices_round_trip() {
        let (_, store) = store();
        let mut snapshot = edited();
        snapshot.products[0].price = 519135.03806292603;
        let mut second = snapshot.products[0].clone();
        second.id = "m2".to_string();
        second.price = 238380.27094376602;
        snapshot.products.push(second);

        store.save(&snapshot).unwrap();

        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn reset_then_load_yields_default() {
        let (_, store) = store();
        store.save(&edited()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.load(), bundled_default());
        assert!(store.persisted().unwrap().is_some());
    }

    #[test]
    fn saving_twice_matches_saving_once() {
        let (_, once) = store();
        once.save(&edited()).unwrap();

        let (_, twice) = store();
        twice.save(&edited()).unwrap();
        twice.save(&edited()).unwrap();

        assert_eq!(once.persisted().unwrap(), twice.persisted().unwrap());
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let (slot, store) = store();
        slot.put(DEFAULT_STORAGE_KEY, "{\"settings\": 42");
        assert_eq!(store.load(), bundled_default());
    }

    #[test]
    fn shape_mismatch_falls_back_to_default() {
        let (slot, store) = store();
        slot.put(DEFAULT_STORAGE_KEY, r#"{"schemaVersion": 1, "content": {"books": []}}"#);
        assert_eq!(store.load(), bundled_default());
    }

    #[test]
    fn read_error_falls_back_to_default() {
        let (slot, store) = store();
        slot.fail_reads(true);
        assert_eq!(store.load(), bundled_default());
    }

    #[test]
    fn legacy_layout_is_upgraded_and_written_back() {
        let (slot, store) = store();
        let snapshot = edited();
        slot.put(DEFAULT_STORAGE_KEY, &serde_json::to_string(&snapshot).unwrap());

        assert_eq!(store.load(), snapshot);

        let raw = store.persisted().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
    }
}
