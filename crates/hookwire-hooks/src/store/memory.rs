//! In-memory store implementation

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use super::HookStore;
use crate::{
    error::{HooksError, Result},
    registry::RegistryState,
};

/// Keeps the last saved state in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<RegistryState>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `state`, as if it had been saved earlier
    pub fn with_state(state: RegistryState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl HookStore for MemoryStore {
    fn load(&self) -> Result<RegistryState> {
        let state = self
            .state
            .lock()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire store lock: {}", e)))?;
        Ok(state.clone())
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        let mut stored = self
            .state
            .lock()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire store lock: {}", e)))?;
        *stored = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ListenerRef;

    #[test]
    fn test_new_store_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_replaces_state() {
        let mut state = RegistryState::new();
        state.insert("greet", ListenerRef::new("upper", 5), None).unwrap();
        let store = MemoryStore::with_state(state.clone());

        store.save(&RegistryState::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.save_count(), 1);
    }
}
