//! Error types for the hooks system
//!
//! Registry and persistence operations return [`Result<T>`]. Dispatch never does:
//! faults raised by individual listeners are logged and skipped so that one
//! missing plugin cannot break unrelated listeners on the same hook.
//!
//! # Error Handling Patterns
//!
//! 1. **Dispatch faults**: an unresolved listener name or a malformed `before`
//!    result is reported through `tracing` and the chain continues.
//!
//! 2. **Registration errors**: empty names and layout mismatches are rejected
//!    before the registry is touched.
//!
//! 3. **Persistence errors**: a failed write is returned to the caller and the
//!    in-memory mutation is rolled back, so memory and artifact never diverge.
//!
//! # Examples
//!
//! ```ignore
//! match registry.register("greet", "upper", 5, None) {
//!     Ok(()) => println!("registered"),
//!     Err(HooksError::LayoutMismatch { hook, .. }) => eprintln!("{} is phased", hook),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::BucketLayout;

/// File operation that failed while persisting registry state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
    Rename,
    CreateDir,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IoOperation::Read => "read",
            IoOperation::Write => "write",
            IoOperation::Rename => "rename",
            IoOperation::CreateDir => "create directory",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the hooks system
#[derive(Debug, Error)]
pub enum HooksError {
    /// Hook not found in the registry
    ///
    /// The string contains the hook name that was not found.
    #[error("Hook not found: {0}")]
    HookNotFound(String),

    /// Hook or listener name rejected at registration time
    #[error("Invalid listener: {0}")]
    InvalidListener(String),

    /// Registration used a layout the hook was not created with
    ///
    /// A hook first registered without a phase keeps a single ordered list;
    /// one first registered with a phase keeps `before`/`after` lists.
    #[error("Hook '{hook}' uses the {expected} layout, not {found}")]
    LayoutMismatch {
        hook: String,
        expected: BucketLayout,
        found: BucketLayout,
    },

    /// Storage or registry error
    ///
    /// Common causes:
    /// - Lock poisoning (a listener or writer panicked while holding the lock)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Reading or writing the persisted hook file failed
    #[error("Failed to {operation} {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        operation: IoOperation,
        source: std::io::Error,
    },

    /// The persisted hook file exists but does not hold a registry
    #[error("Corrupt hook state in {path}: {source}")]
    CorruptState {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Invalid configuration file
    #[error("Invalid hook configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    ///
    /// Wraps `serde_yaml::Error` for YAML parsing failures.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HooksError {
    /// Build a [`HooksError::PersistenceFailed`] for `path`
    pub fn persistence(path: &Path, operation: IoOperation, source: std::io::Error) -> Self {
        HooksError::PersistenceFailed {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }
}

/// Result type for hooks operations
pub type Result<T> = std::result::Result<T, HooksError>;
