//! Hook registry for storing and ordering listeners
//!
//! The hook registry maps hook names to priority-ordered listener lists and
//! writes the whole mapping through to its store after every change.
//!
//! # Examples
//!
//! ```ignore
//! use hookwire_hooks::{HookRegistry, Phase, StoredHookRegistry};
//!
//! let registry = StoredHookRegistry::in_memory();
//!
//! registry.register("greet", "shout", 10, None)?;
//! registry.register("greet", "upper", 5, None)?;
//! assert_eq!(registry.listeners("greet", None), vec!["upper", "shout"]);
//!
//! registry.add_before("proc", "upper_arg", 5)?;
//! registry.add_after("proc", "star", 10)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod state;
pub mod storage;

pub use state::RegistryState;
pub use storage::StoredHookRegistry;

use crate::{
    error::Result,
    types::{HookBucket, ListenerRef, Phase, DEFAULT_PRIORITY},
};

/// Trait for managing hook registrations
///
/// Mutating methods take `&self`: implementations serialize writers internally
/// so that one registry can be shared between a dispatcher and its callers.
///
/// # Thread Safety
///
/// All implementations must be thread-safe (`Send + Sync`).
pub trait HookRegistry: Send + Sync {
    /// Register a listener on a hook
    ///
    /// Inserts `listener` into the list for `hook` (the `phase` list of a phased
    /// hook, otherwise the single list), re-sorts that list by priority and
    /// persists the full registry. The same listener may be registered any
    /// number of times; it runs once per registration.
    ///
    /// # Arguments
    ///
    /// * `hook` - Hook name
    /// * `listener` - Name resolved to a callable at dispatch time
    /// * `priority` - Lower runs earlier
    /// * `phase` - `None` for action/filter hooks, `Some` for wrapped functions
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty, if `phase` contradicts the hook's
    /// existing layout, or if persisting fails (the registration is then undone)
    fn register(&self, hook: &str, listener: &str, priority: i64, phase: Option<Phase>)
        -> Result<()>;

    /// Remove every registration of `listener` from `hook`/`phase`
    ///
    /// # Returns
    ///
    /// The number of registrations removed
    ///
    /// # Errors
    ///
    /// Returns an error if the hook is not found, the phase does not fit its
    /// layout, or persisting fails
    fn unregister(&self, hook: &str, listener: &str, phase: Option<Phase>) -> Result<usize>;

    /// Remove a hook and all of its listeners
    ///
    /// # Errors
    ///
    /// Returns an error if the hook is not found or persisting fails
    fn clear_hook(&self, hook: &str) -> Result<()>;

    /// Ordered listeners (with priorities) for `hook`/`phase`
    ///
    /// Empty when the hook is unknown or `phase` does not match its layout.
    fn entries(&self, hook: &str, phase: Option<Phase>) -> Vec<ListenerRef>;

    /// The bucket registered for `hook`
    fn bucket(&self, hook: &str) -> Option<HookBucket>;

    /// All hook names, sorted
    fn hook_names(&self) -> Vec<String>;

    /// Consistent copy of the whole registry
    fn snapshot(&self) -> RegistryState;

    /// Replace the in-memory registry with the store's contents
    ///
    /// A store that holds nothing yields an empty registry.
    fn load(&self) -> Result<()>;

    /// Overwrite the store with the in-memory registry
    fn save(&self) -> Result<()>;

    /// Priority used by [`add_action`](Self::add_action) and
    /// [`add_filter`](Self::add_filter)
    fn default_priority(&self) -> i64 {
        DEFAULT_PRIORITY
    }

    /// Listener names for `hook`/`phase` in current priority order
    fn listeners(&self, hook: &str, phase: Option<Phase>) -> Vec<String> {
        self.entries(hook, phase)
            .into_iter()
            .map(|l| l.function)
            .collect()
    }

    /// Register an action listener at the default priority
    fn add_action(&self, hook: &str, listener: &str) -> Result<()> {
        self.register(hook, listener, self.default_priority(), None)
    }

    /// Register a filter listener at the default priority
    ///
    /// Actions and filters share one list per hook.
    fn add_filter(&self, hook: &str, listener: &str) -> Result<()> {
        self.register(hook, listener, self.default_priority(), None)
    }

    /// Register a listener that runs before the function wrapped as `hook`
    fn add_before(&self, hook: &str, listener: &str, priority: i64) -> Result<()> {
        self.register(hook, listener, priority, Some(Phase::Before))
    }

    /// Register a listener that runs after the function wrapped as `hook`
    fn add_after(&self, hook: &str, listener: &str, priority: i64) -> Result<()> {
        self.register(hook, listener, priority, Some(Phase::After))
    }
}
