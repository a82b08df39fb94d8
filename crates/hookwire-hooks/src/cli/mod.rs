//! Command layer for hook management
//!
//! This module provides the commands behind the `hookwire` binary: listing and
//! inspecting hooks, registering and unregistering listeners, and clearing hooks.

pub mod commands;
pub mod formatter;

pub use commands::{
    clear_hook, inspect_hook, inspect_hook_json, list_hooks, list_hooks_json, register_listener,
    unregister_listener, HookCommand,
};
pub use formatter::{format_bucket_json, format_hook_table, format_hooks_table, format_state_json};

use crate::{
    error::{HooksError, Result},
    registry::HookRegistry,
};

fn wants_json(format: Option<&str>) -> bool {
    matches!(format, Some(f) if f.eq_ignore_ascii_case("json"))
}

/// Hook management CLI interface
pub struct HookCli<R: HookRegistry> {
    registry: R,
}

impl<R: HookRegistry> HookCli<R> {
    /// Create a new hook CLI instance
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Execute a hook command, returning the text to print
    pub fn execute(&self, command: HookCommand) -> Result<String> {
        match command {
            HookCommand::List { format } => {
                let state = self.registry.snapshot();
                if wants_json(format.as_deref()) {
                    format_state_json(&state)
                } else {
                    Ok(format_hooks_table(&state))
                }
            }
            HookCommand::Inspect { hook, format } => {
                let bucket = self
                    .registry
                    .bucket(&hook)
                    .ok_or_else(|| HooksError::HookNotFound(hook.clone()))?;
                if wants_json(format.as_deref()) {
                    format_bucket_json(&hook, &bucket)
                } else {
                    Ok(format_hook_table(&hook, &bucket))
                }
            }
            HookCommand::Register {
                hook,
                listener,
                priority,
                phase,
            } => {
                let priority = priority.unwrap_or_else(|| self.registry.default_priority());
                self.registry.register(&hook, &listener, priority, phase)?;
                Ok(match phase {
                    Some(phase) => format!(
                        "Listener '{}' registered on hook '{}' ({}) with priority {}",
                        listener, hook, phase, priority
                    ),
                    None => format!(
                        "Listener '{}' registered on hook '{}' with priority {}",
                        listener, hook, priority
                    ),
                })
            }
            HookCommand::Unregister {
                hook,
                listener,
                phase,
            } => {
                let removed = self.registry.unregister(&hook, &listener, phase)?;
                Ok(format!(
                    "Removed {} registration(s) of '{}' from hook '{}'",
                    removed, listener, hook
                ))
            }
            HookCommand::Clear { hook } => {
                self.registry.clear_hook(&hook)?;
                Ok(format!("Hook '{}' cleared", hook))
            }
        }
    }
}
