//! Before/after interception around a wrapped function

use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::chain::HookDispatcher;
use crate::{
    resolver::Listener,
    types::{Arguments, BeforeOutcome, DispatchReport, Phase},
};

/// Progress of one wrapped call
///
/// Every call walks `Pending → Before → Invoked → After → Done`; nothing
/// carries over between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStage {
    Pending,
    Before,
    Invoked,
    After,
    Done,
}

impl WrapStage {
    pub fn next(self) -> Self {
        match self {
            WrapStage::Pending => WrapStage::Before,
            WrapStage::Before => WrapStage::Invoked,
            WrapStage::Invoked => WrapStage::After,
            WrapStage::After | WrapStage::Done => WrapStage::Done,
        }
    }
}

/// What ran on each side of a wrapped call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapReport {
    pub before: DispatchReport,
    pub after: DispatchReport,
}

/// A function wrapped with the `before`/`after` listeners of a hook
///
/// Calling it looks like calling the target: [`Arguments`] in, [`Value`] out.
pub struct Wrapped<F> {
    hook: String,
    dispatcher: HookDispatcher,
    target: F,
}

impl<F> Wrapped<F>
where
    F: Fn(Arguments) -> Value,
{
    pub(crate) fn new(hook: String, dispatcher: HookDispatcher, target: F) -> Self {
        Self {
            hook,
            dispatcher,
            target,
        }
    }

    pub fn hook(&self) -> &str {
        &self.hook
    }

    /// Run the `before` listeners, the target, then the `after` listeners
    pub fn call(&self, args: Arguments) -> Value {
        self.call_with_report(args).0
    }

    /// [`call`](Self::call), also returning what ran on each side
    pub fn call_with_report(&self, args: Arguments) -> (Value, WrapReport) {
        // One read for both sides, so the call never mixes two registry states.
        let bucket = self.dispatcher.registry().bucket(&self.hook);
        let list = |phase| {
            bucket
                .as_ref()
                .and_then(|b| b.list(Some(phase)))
                .unwrap_or(&[])
        };
        let (before, after) = (list(Phase::Before), list(Phase::After));

        let mut report = WrapReport {
            before: DispatchReport::new(self.hook.as_str()),
            after: DispatchReport::new(self.hook.as_str()),
        };
        let mut stage = WrapStage::Pending;

        stage = self.advance(stage);
        let args = before.iter().fold(args, |args, listener| {
            self.before_step(&listener.function, args, &mut report.before)
        });

        stage = self.advance(stage);
        let result = (self.target)(args);

        stage = self.advance(stage);
        let result = after.iter().fold(result, |result, listener| {
            self.dispatcher.filter_step(
                &self.hook,
                &listener.function,
                result,
                &mut report.after,
                |result| Arguments::positional([result]),
            )
        });

        self.advance(stage);
        (result, report)
    }

    /// Turn the wrapper into a plain closure with the target's signature
    pub fn into_fn(self) -> impl Fn(Arguments) -> Value {
        move |args| self.call(args)
    }

    fn before_step(&self, name: &str, args: Arguments, report: &mut DispatchReport) -> Arguments {
        match self.dispatcher.resolve(&self.hook, name, report) {
            Some(Listener::Interceptor(f)) => {
                report.invoked += 1;
                match f(&args) {
                    BeforeOutcome::Replace(replacement) => replacement,
                    BeforeOutcome::Unchanged => args,
                }
            }
            Some(Listener::Function(f)) => {
                // A plain function cannot hand back replacement arguments.
                report.invoked += 1;
                f(&args);
                debug!(
                    hook = %self.hook,
                    listener = %name,
                    "Before listener returned no replacement, keeping arguments"
                );
                args
            }
            None => args,
        }
    }

    fn advance(&self, stage: WrapStage) -> WrapStage {
        let next = stage.next();
        debug!(hook = %self.hook, stage = ?next, "Wrapped call stage");
        next
    }
}

impl<F> fmt::Debug for Wrapped<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped").field("hook", &self.hook).finish()
    }
}
