//! Hook management commands

use crate::types::Phase;

/// Hook management commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCommand {
    /// List every hook and its listeners
    List {
        /// Output format (table or json)
        format: Option<String>,
    },

    /// Inspect one hook
    Inspect {
        /// Hook name
        hook: String,

        /// Output format (table or json)
        format: Option<String>,
    },

    /// Register a listener
    Register {
        /// Hook name
        hook: String,

        /// Listener name
        listener: String,

        /// Priority (registry default when absent)
        priority: Option<i64>,

        /// Phase for wrapped-function hooks
        phase: Option<Phase>,
    },

    /// Remove every registration of a listener
    Unregister {
        /// Hook name
        hook: String,

        /// Listener name
        listener: String,

        /// Phase for wrapped-function hooks
        phase: Option<Phase>,
    },

    /// Remove a hook and all of its listeners
    Clear {
        /// Hook name
        hook: String,
    },
}

/// List all hooks
pub fn list_hooks() -> HookCommand {
    HookCommand::List { format: None }
}

/// List all hooks with JSON format
pub fn list_hooks_json() -> HookCommand {
    HookCommand::List {
        format: Some("json".to_string()),
    }
}

/// Inspect a hook
pub fn inspect_hook(hook: impl Into<String>) -> HookCommand {
    HookCommand::Inspect {
        hook: hook.into(),
        format: None,
    }
}

/// Inspect a hook with JSON format
pub fn inspect_hook_json(hook: impl Into<String>) -> HookCommand {
    HookCommand::Inspect {
        hook: hook.into(),
        format: Some("json".to_string()),
    }
}

/// Register a listener at an explicit priority
pub fn register_listener(
    hook: impl Into<String>,
    listener: impl Into<String>,
    priority: i64,
) -> HookCommand {
    HookCommand::Register {
        hook: hook.into(),
        listener: listener.into(),
        priority: Some(priority),
        phase: None,
    }
}

/// Unregister a listener
pub fn unregister_listener(hook: impl Into<String>, listener: impl Into<String>) -> HookCommand {
    HookCommand::Unregister {
        hook: hook.into(),
        listener: listener.into(),
        phase: None,
    }
}

/// Clear a hook
pub fn clear_hook(hook: impl Into<String>) -> HookCommand {
    HookCommand::Clear { hook: hook.into() }
}
