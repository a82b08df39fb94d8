//! Output formatting for hook commands

use crate::error::{HooksError, Result};
use crate::registry::RegistryState;
use crate::types::{HookBucket, ListenerRef};

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn listener_summary(listeners: &[ListenerRef]) -> String {
    listeners
        .iter()
        .map(|l| format!("{}({})", l.function, l.priority))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_listeners(output: &mut String, label: &str, listeners: &[ListenerRef]) {
    output.push_str(&format!("{}\n", label));
    if listeners.is_empty() {
        output.push_str("  (none)\n");
        return;
    }
    for (position, listener) in listeners.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<32} priority {}\n",
            position + 1,
            listener.function,
            listener.priority
        ));
    }
}

/// Format a single hook as a table
pub fn format_hook_table(hook: &str, bucket: &HookBucket) -> String {
    let mut output = String::new();
    output.push_str(&format!("Hook:        {}\n", hook));
    output.push_str(&format!("Layout:      {}\n", bucket.layout()));
    output.push_str(&format!("Listeners:   {}\n", bucket.len()));

    match bucket {
        HookBucket::Simple(listeners) => push_listeners(&mut output, "Order:", listeners),
        HookBucket::Phased { before, after } => {
            push_listeners(&mut output, "Before:", before);
            push_listeners(&mut output, "After:", after);
        }
    }

    output
}

/// Format every hook in the registry as a table
pub fn format_hooks_table(state: &RegistryState) -> String {
    if state.is_empty() {
        return "No hooks found".to_string();
    }

    let mut output = String::new();
    output.push_str("Hook                     | Layout | Count | Listeners\n");
    output.push_str("-------------------------|--------|-------|--------------------------------\n");

    for (hook, bucket) in state.iter() {
        let listeners = match bucket {
            HookBucket::Simple(listeners) => listener_summary(listeners),
            HookBucket::Phased { before, after } => format!(
                "before: [{}] after: [{}]",
                listener_summary(before),
                listener_summary(after)
            ),
        };

        output.push_str(&format!(
            "{:<24} | {:<6} | {:>5} | {}\n",
            truncate(hook, 24),
            bucket.layout().to_string(),
            bucket.len(),
            listeners
        ));
    }

    output
}

/// Format a single hook as JSON, in the persisted shape
pub fn format_bucket_json(hook: &str, bucket: &HookBucket) -> Result<String> {
    serde_json::to_string_pretty(bucket).map_err(|e| {
        HooksError::InvalidConfiguration(format!("Failed to serialize hook '{}': {}", hook, e))
    })
}

/// Format the whole registry as JSON, in the persisted shape
pub fn format_state_json(state: &RegistryState) -> Result<String> {
    serde_json::to_string_pretty(state)
        .map_err(|e| HooksError::InvalidConfiguration(format!("Failed to serialize hooks: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn sample_state() -> RegistryState {
        let mut state = RegistryState::new();
        state.insert("greet", ListenerRef::new("shout", 10), None).unwrap();
        state.insert("greet", ListenerRef::new("upper", 5), None).unwrap();
        state
            .insert("proc", ListenerRef::new("upper_arg", 5), Some(Phase::Before))
            .unwrap();
        state
            .insert("proc", ListenerRef::new("star", 10), Some(Phase::After))
            .unwrap();
        state
    }

    #[test]
    fn test_format_hook_table_simple() {
        let state = sample_state();
        let output = format_hook_table("greet", state.bucket("greet").unwrap());

        assert!(output.contains("Hook:        greet"));
        assert!(output.contains("simple"));
        let upper = output.find("upper").unwrap();
        let shout = output.find("shout").unwrap();
        assert!(upper < shout);
    }

    #[test]
    fn test_format_hook_table_phased() {
        let state = sample_state();
        let output = format_hook_table("proc", state.bucket("proc").unwrap());

        assert!(output.contains("phased"));
        assert!(output.contains("Before:"));
        assert!(output.contains("After:"));
        assert!(output.contains("upper_arg"));
        assert!(output.contains("priority 10"));
    }

    #[test]
    fn test_format_hooks_table_empty() {
        assert_eq!(format_hooks_table(&RegistryState::new()), "No hooks found");
    }

    #[test]
    fn test_format_hooks_table() {
        let output = format_hooks_table(&sample_state());

        assert!(output.contains("upper(5), shout(10)"));
        assert!(output.contains("before: [upper_arg(5)] after: [star(10)]"));
    }

    #[test]
    fn test_format_hooks_table_truncation() {
        let mut state = RegistryState::new();
        state
            .insert(&"h".repeat(50), ListenerRef::new("x", 1), None)
            .unwrap();

        assert!(format_hooks_table(&state).contains("..."));
    }

    #[test]
    fn test_format_state_json_matches_persisted_shape() {
        let json = format_state_json(&sample_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["greet"][0]["function"], "upper");
        assert_eq!(value["proc"]["after"][0]["priority"], 10);
    }

    #[test]
    fn test_format_bucket_json() {
        let state = sample_state();
        let json = format_bucket_json("greet", state.bucket("greet").unwrap()).unwrap();

        assert!(json.contains("\"function\": \"upper\""));
    }
}
