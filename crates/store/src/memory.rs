use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use wrp_kernel::slot::{PersistenceSlot, SlotError};

/// `HashMap`-backed slot. Values are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, SlotError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        Ok(values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_remove() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("k").unwrap(), None);

        slot.write("k", "v1").unwrap();
        slot.write("k", "v2").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("v2"));

        assert!(slot.remove("k").unwrap());
        assert!(!slot.remove("k").unwrap());
    }
}
