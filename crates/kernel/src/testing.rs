use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::capability::AdminGate;
use crate::slot::{PersistenceSlot, SlotError};

#[derive(Default)]
pub struct MapSlot {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MapSlot {
    pub fn put(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl PersistenceSlot for MapSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::other("read refused").into());
        }
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("write refused").into());
        }
        self.put(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, SlotError> {
        Ok(self.values.lock().unwrap().remove(key).is_some())
    }
}

/// Holds each write until the test sends a release.
pub struct ParkedSlot {
    inner: MapSlot,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl ParkedSlot {
    /// The slot, a receiver signalled when a write starts, and the release sender.
    pub fn new() -> (Arc<Self>, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let slot = Arc::new(Self {
            inner: MapSlot::default(),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        });
        (slot, entered_rx, release_tx)
    }
}

impl PersistenceSlot for ParkedSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let _ = self.entered.lock().unwrap().send(());
        let _ = self.release.lock().unwrap().recv();
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, SlotError> {
        self.inner.remove(key)
    }
}

#[derive(Default)]
pub struct FlagGate(AtomicBool);

impl AdminGate for FlagGate {
    fn can_edit(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set_admin(&self, enabled: bool) -> bool {
        self.0.store(enabled, Ordering::SeqCst);
        enabled
    }
}
