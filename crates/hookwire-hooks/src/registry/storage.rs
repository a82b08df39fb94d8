//! Write-through hook registry implementation

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{error, info};

use super::{state::RegistryState, HookRegistry};
use crate::{
    error::{HooksError, Result},
    store::{HookStore, MemoryStore},
    types::{HookBucket, ListenerRef, Phase, DEFAULT_PRIORITY},
};

/// Hook registry that persists every mutation to a [`HookStore`]
///
/// Writers are serialized by one lock that is held across the store write, so
/// a mutation and its persistence are observed together. If the store rejects
/// the write, the mutation is rolled back before the error is returned.
#[derive(Debug)]
pub struct StoredHookRegistry {
    state: RwLock<RegistryState>,
    store: Box<dyn HookStore>,
    default_priority: i64,
}

impl StoredHookRegistry {
    /// Create an empty registry backed by `store` without reading it
    pub fn new(store: impl HookStore + 'static) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            store: Box::new(store),
            default_priority: DEFAULT_PRIORITY,
        }
    }

    /// Create a registry hydrated from `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read
    pub fn open(store: impl HookStore + 'static) -> Result<Self> {
        let registry = Self::new(store);
        registry.load()?;
        Ok(registry)
    }

    /// Create a registry that persists to memory only
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn with_default_priority(mut self, priority: i64) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn store(&self) -> &dyn HookStore {
        self.store.as_ref()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|poisoned| {
            error!("Hook registry lock poisoned, reading last written state");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire write lock: {}", e)))
    }

    /// Apply `op` and persist the result, restoring the previous state on failure
    fn mutate<T>(&self, op: impl FnOnce(&mut RegistryState) -> Result<T>) -> Result<T> {
        let mut state = self.write()?;
        let previous = state.clone();

        let output = match op(&mut *state) {
            Ok(output) => output,
            Err(e) => {
                *state = previous;
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&state) {
            error!(error = %e, "Failed to persist hooks, rolling back");
            *state = previous;
            return Err(e);
        }

        Ok(output)
    }
}

impl Default for StoredHookRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl HookRegistry for StoredHookRegistry {
    fn register(
        &self,
        hook: &str,
        listener: &str,
        priority: i64,
        phase: Option<Phase>,
    ) -> Result<()> {
        self.mutate(|state| state.insert(hook, ListenerRef::new(listener, priority), phase))?;

        info!(
            hook = %hook,
            listener = %listener,
            priority = priority,
            phase = ?phase,
            "Hook listener registered"
        );
        Ok(())
    }

    fn unregister(&self, hook: &str, listener: &str, phase: Option<Phase>) -> Result<usize> {
        let removed = self.mutate(|state| state.remove(hook, listener, phase))?;

        info!(
            hook = %hook,
            listener = %listener,
            removed = removed,
            "Hook listener unregistered"
        );
        Ok(removed)
    }

    fn clear_hook(&self, hook: &str) -> Result<()> {
        self.mutate(|state| state.remove_hook(hook).map(|_| ()))?;
        info!(hook = %hook, "Hook cleared");
        Ok(())
    }

    fn entries(&self, hook: &str, phase: Option<Phase>) -> Vec<ListenerRef> {
        self.read().entries(hook, phase).to_vec()
    }

    fn bucket(&self, hook: &str) -> Option<HookBucket> {
        self.read().bucket(hook).cloned()
    }

    fn hook_names(&self) -> Vec<String> {
        self.read().hook_names()
    }

    fn snapshot(&self) -> RegistryState {
        self.read().clone()
    }

    fn load(&self) -> Result<()> {
        let mut state = self.write()?;
        let mut loaded = self.store.load()?;
        loaded.sort_lists();
        loaded.validate()?;
        *state = loaded;
        info!(hook_count = state.len(), "Hooks loaded");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let state = self.write()?;
        self.store.save(&state)
    }

    fn default_priority(&self) -> i64 {
        self.default_priority
    }
}
