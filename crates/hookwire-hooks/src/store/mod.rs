//! Persistence for registry state
//!
//! A store loads and saves the complete [`RegistryState`] as one artifact.
//! Saving always overwrites the whole artifact; there is no merge or append.
//! A missing artifact is an empty registry, not an error.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::{error::Result, registry::RegistryState};

/// Backing artifact for a hook registry
pub trait HookStore: Send + Sync + std::fmt::Debug {
    /// Read the persisted state, or an empty state when nothing was saved yet
    fn load(&self) -> Result<RegistryState>;

    /// Replace the persisted state with `state`
    fn save(&self, state: &RegistryState) -> Result<()>;
}
