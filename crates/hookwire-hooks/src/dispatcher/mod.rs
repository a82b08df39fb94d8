//! Hook dispatch and function wrapping
//!
//! The dispatcher reads ordered listener lists from a [`HookRegistry`] and
//! calls the listeners a [`ListenerResolver`] knows, one at a time:
//!
//! 1. **Action dispatch** (`do_action`): every listener receives the same
//!    arguments; return values are discarded
//! 2. **Filter chain** (`apply_filters`): a value is threaded through every
//!    listener, each one returning the input of the next
//! 3. **Before/after wrapping** (`wrap`): `before` listeners may replace the
//!    arguments of a wrapped function, `after` listeners transform its result
//!
//! Listener lists are copied when a dispatch starts, so a listener that
//! registers more listeners does not change the dispatch it runs in.
//!
//! # Examples
//!
//! ```ignore
//! let registry = Arc::new(StoredHookRegistry::in_memory());
//! registry.register("greet", "upper", 5, None)?;
//! registry.register("greet", "shout", 10, None)?;
//!
//! let dispatcher = HookDispatcher::new(registry, Arc::new(resolver));
//! let greeting = dispatcher.apply_filters("greet", json!("hi"), &Arguments::new());
//! assert_eq!(greeting, json!("HI!"));
//! ```
//!
//! [`HookRegistry`]: crate::registry::HookRegistry
//! [`ListenerResolver`]: crate::resolver::ListenerResolver

pub mod chain;
pub mod wrap;

pub use chain::HookDispatcher;
pub use wrap::{WrapReport, WrapStage, Wrapped};
