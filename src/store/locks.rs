use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

/// Per-key async mutexes. The backing store has no transactions, so
/// conflicting read-modify-write sequences against the same logical
/// resource are serialized in-process instead: callers take the key's
/// lock for the whole validate-and-write section.
#[derive(Default)]
pub struct KeyedLocks {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mutex handle for `key`, creating it on first use.
    /// Lock it with `.lock().await`; the handle keeps the entry alive.
    pub fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().expect("keyed lock map poisoned");
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops all lock entries. In-flight guards keep their own handles
    /// alive; new callers start fresh.
    pub fn reset(&self) {
        self.inner.lock().expect("keyed lock map poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_serializes_different_keys_do_not() {
        let locks = Arc::new(KeyedLocks::new());

        let a = locks.handle("x");
        let guard = a.lock().await;

        // Different key locks immediately.
        let b = locks.handle("y");
        assert!(b.try_lock().is_ok());

        // Same key is held.
        let a2 = locks.handle("x");
        assert!(a2.try_lock().is_err());

        drop(guard);
        assert!(a2.try_lock().is_ok());
    }
}
