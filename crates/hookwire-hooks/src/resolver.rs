//! Listener name resolution
//!
//! The registry only knows listener names. A [`ListenerResolver`] turns a name
//! into something callable when a hook fires; names it does not know are
//! skipped by the dispatcher.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::types::{Arguments, BeforeOutcome};

/// Plain listener: receives arguments, returns a value
pub type ListenerFn = Arc<dyn Fn(&Arguments) -> Value + Send + Sync>;

/// `before` listener: receives the call's arguments and may replace them
pub type InterceptorFn = Arc<dyn Fn(&Arguments) -> BeforeOutcome + Send + Sync>;

/// A callable listener
#[derive(Clone)]
pub enum Listener {
    /// Used by actions, filters and `after` listeners
    Function(ListenerFn),
    /// Used by `before` listeners
    Interceptor(InterceptorFn),
}

impl Listener {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Arguments) -> Value + Send + Sync + 'static,
    {
        Listener::Function(Arc::new(f))
    }

    pub fn interceptor<F>(f: F) -> Self
    where
        F: Fn(&Arguments) -> BeforeOutcome + Send + Sync + 'static,
    {
        Listener::Interceptor(Arc::new(f))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Listener::Function(_) => "function",
            Listener::Interceptor(_) => "interceptor",
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.kind()).finish()
    }
}

/// Resolves listener names to callables at dispatch time
pub trait ListenerResolver: Send + Sync {
    /// The listener registered under `name`, if any
    fn resolve(&self, name: &str) -> Option<Listener>;
}

/// Fixed table of known listeners
///
/// # Examples
///
/// ```ignore
/// let resolver = StaticResolver::new()
///     .with_function("shout", |args| {
///         let text = args.arg(0).and_then(|v| v.as_str()).unwrap_or_default();
///         json!(format!("{}!", text))
///     });
/// ```
#[derive(Clone, Default)]
pub struct StaticResolver {
    listeners: HashMap<String, Listener>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Arguments) -> Value + Send + Sync + 'static,
    {
        self.insert(name, Listener::function(f));
        self
    }

    pub fn with_interceptor<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Arguments) -> BeforeOutcome + Send + Sync + 'static,
    {
        self.insert(name, Listener::interceptor(f));
        self
    }

    /// Add or replace a listener, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, listener: Listener) -> Option<Listener> {
        self.listeners.insert(name.into(), listener)
    }

    pub fn remove(&mut self, name: &str) -> Option<Listener> {
        self.listeners.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    /// Known names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.listeners.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for StaticResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticResolver")
            .field("names", &self.names())
            .finish()
    }
}

impl ListenerResolver for StaticResolver {
    fn resolve(&self, name: &str) -> Option<Listener> {
        self.listeners.get(name).cloned()
    }
}

/// Resolver backed by an arbitrary lookup function
pub struct FnResolver<F> {
    lookup: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&str) -> Option<Listener> + Send + Sync,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> ListenerResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<Listener> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<Listener> {
        (self.lookup)(name)
    }
}
