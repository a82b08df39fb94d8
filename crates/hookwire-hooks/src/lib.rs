//! Hookwire hook registry
//!
//! Named extension points with priority-ordered listeners, persisted across
//! restarts.
//!
//! # Overview
//!
//! Code declares an extension point by name and other code attaches listeners
//! to it. A hook is used in one of three ways:
//!
//! - **Action**: every listener is called with the same arguments; results are discarded
//! - **Filter**: a value is threaded through the listeners, each transforming it
//! - **Wrapped function**: `before` listeners may rewrite a function's arguments,
//!   `after` listeners transform its result
//!
//! Listeners are stored by name with an integer priority (lower runs first,
//! ties keep registration order) and resolved to callables only when a hook fires.
//!
//! # Architecture
//!
//! The system consists of four main components:
//!
//! 1. **Hook Registry** (`registry`): Ordered listener lists, written through on every change
//! 2. **Store** (`store`): Persisted artifact (`hooks.json`) behind the registry
//! 3. **Resolver** (`resolver`): Turns listener names into callables
//! 4. **Dispatcher** (`dispatcher`): Runs actions, filter chains and wrapped calls
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use hookwire_hooks::*;
//! use serde_json::json;
//!
//! let registry = Arc::new(StoredHookRegistry::open(JsonFileStore::new("hooks.json"))?);
//! registry.register("greet", "shout", 10, None)?;
//! registry.register("greet", "upper", 5, None)?;
//!
//! let resolver = StaticResolver::new()
//!     .with_function("upper", |args| {
//!         json!(args.arg(0).and_then(|v| v.as_str()).unwrap_or_default().to_uppercase())
//!     })
//!     .with_function("shout", |args| {
//!         json!(format!("{}!", args.arg(0).and_then(|v| v.as_str()).unwrap_or_default()))
//!     });
//!
//! let dispatcher = HookDispatcher::new(registry, Arc::new(resolver));
//! assert_eq!(dispatcher.apply_filters("greet", json!("hi"), &Arguments::new()), json!("HI!"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Persisted Format
//!
//! ```json
//! {
//!   "greet": [
//!     { "function": "upper", "priority": 5 },
//!     { "function": "shout", "priority": 10 }
//!   ],
//!   "proc": {
//!     "before": [{ "function": "upper_arg", "priority": 5 }],
//!     "after": [{ "function": "star", "priority": 10 }]
//!   }
//! }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T>` which is an alias for `std::result::Result<T, HooksError>`.
//! Dispatch itself never fails: unknown listener names are logged and skipped.
//!
//! # Thread Safety
//!
//! Registries, stores and resolvers are `Send + Sync`. Listeners run on the
//! calling thread, one at a time.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod types;

// Re-export public types
pub use cli::{HookCli, HookCommand};
pub use config::{ConfigLoader, HooksConfig};
pub use dispatcher::{HookDispatcher, WrapReport, WrapStage, Wrapped};
pub use error::{HooksError, IoOperation, Result};
pub use registry::{HookRegistry, RegistryState, StoredHookRegistry};
pub use resolver::{FnResolver, Listener, ListenerResolver, StaticResolver};
pub use store::{HookStore, JsonFileStore, MemoryStore};
pub use types::{
    Arguments, BeforeOutcome, BucketLayout, DispatchReport, HookBucket, ListenerRef, Phase,
    DEFAULT_PRIORITY,
};
