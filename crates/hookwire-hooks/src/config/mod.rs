//! Hook registry configuration
//!
//! Settings are read from YAML files in a hierarchy of sources:
//! Environment → Project → User → Defaults. See [`ConfigLoader`].

pub mod loader;

pub use loader::{ConfigLoader, HooksConfig, CONFIG_DIR, CONFIG_FILE, STATE_FILE_ENV};
