//! Action dispatch and filter chains

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::wrap::Wrapped;
use crate::{
    registry::HookRegistry,
    resolver::{Listener, ListenerResolver},
    types::{Arguments, DispatchReport},
};

/// Runs registered listeners in priority order
///
/// Dispatch never fails: a name the resolver does not know is logged, recorded
/// in the [`DispatchReport`] and skipped, and the remaining listeners still run.
#[derive(Clone)]
pub struct HookDispatcher {
    registry: Arc<dyn HookRegistry>,
    resolver: Arc<dyn ListenerResolver>,
}

impl HookDispatcher {
    /// Create a new dispatcher
    ///
    /// # Arguments
    ///
    /// * `registry` - Source of ordered listener names
    /// * `resolver` - Turns listener names into callables
    pub fn new(registry: Arc<dyn HookRegistry>, resolver: Arc<dyn ListenerResolver>) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &Arc<dyn HookRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &Arc<dyn ListenerResolver> {
        &self.resolver
    }

    /// Call every listener on `hook` with `args`, discarding their results
    pub fn do_action(&self, hook: &str, args: &Arguments) -> DispatchReport {
        let names = self.registry.listeners(hook, None);
        let mut report = DispatchReport::new(hook);

        if names.is_empty() {
            debug!(hook = %hook, "No listeners registered for action");
            return report;
        }

        debug!(hook = %hook, listener_count = names.len(), "Dispatching action");

        for name in &names {
            match self.resolve(hook, name, &mut report) {
                Some(Listener::Function(f)) => {
                    f(args);
                }
                Some(Listener::Interceptor(f)) => {
                    f(args);
                }
                None => continue,
            }
            report.invoked += 1;
        }

        report
    }

    /// Thread `value` through every listener on `hook` and return the result
    ///
    /// Each listener receives `value` as its first positional argument followed
    /// by `args`. With no listeners `value` is returned unchanged.
    pub fn apply_filters(&self, hook: &str, value: Value, args: &Arguments) -> Value {
        self.apply_filters_report(hook, value, args).0
    }

    /// [`apply_filters`](Self::apply_filters), also returning what ran
    pub fn apply_filters_report(
        &self,
        hook: &str,
        value: Value,
        args: &Arguments,
    ) -> (Value, DispatchReport) {
        let names = self.registry.listeners(hook, None);
        let mut report = DispatchReport::new(hook);

        if !names.is_empty() {
            debug!(hook = %hook, listener_count = names.len(), "Applying filters");
        }

        let value = names.iter().fold(value, |value, name| {
            self.filter_step(hook, name, value, &mut report, |value| args.prepended(value))
        });

        (value, report)
    }

    /// Wrap `target` so the `before`/`after` listeners of `hook` run around it
    pub fn wrap<F>(&self, hook: impl Into<String>, target: F) -> Wrapped<F>
    where
        F: Fn(Arguments) -> Value,
    {
        Wrapped::new(hook.into(), self.clone(), target)
    }

    /// Resolve `name`, recording it as unresolved when the resolver does not know it
    pub(crate) fn resolve(
        &self,
        hook: &str,
        name: &str,
        report: &mut DispatchReport,
    ) -> Option<Listener> {
        let listener = self.resolver.resolve(name);
        if listener.is_none() {
            warn!(hook = %hook, listener = %name, "Listener not found, skipping");
            report.unresolved.push(name.to_string());
        }
        listener
    }

    /// One fold step shared by filter chains and `after` listeners
    ///
    /// `call_args` builds the listener's arguments from the current value.
    pub(crate) fn filter_step(
        &self,
        hook: &str,
        name: &str,
        value: Value,
        report: &mut DispatchReport,
        call_args: impl Fn(Value) -> Arguments,
    ) -> Value {
        match self.resolve(hook, name, report) {
            Some(Listener::Function(f)) => {
                report.invoked += 1;
                f(&call_args(value))
            }
            Some(Listener::Interceptor(_)) => {
                warn!(
                    hook = %hook,
                    listener = %name,
                    "Interceptor cannot transform a value, skipping"
                );
                report.skipped.push(name.to_string());
                value
            }
            None => value,
        }
    }
}

impl fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("hooks", &self.registry.hook_names())
            .finish()
    }
}
