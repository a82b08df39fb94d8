//! Core data types for the hooks system
//!
//! Listeners are stored by name, never by reference, so that the whole registry
//! can be written to disk and read back. The name is resolved to a callable only
//! when a hook fires (see [`crate::resolver`]).
//!
//! # Examples
//!
//! ```ignore
//! use hookwire_hooks::*;
//!
//! let upper = ListenerRef::new("upper", 5);
//! let args = Arguments::new().with_arg("hi").with_kwarg("lang", "en");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Priority assigned when the caller does not name one
pub const DEFAULT_PRIORITY: i64 = 10;

/// A listener registered against a hook
///
/// Lower priorities run earlier; equal priorities keep registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerRef {
    /// Name used to resolve the callable at dispatch time
    pub function: String,

    /// Ordering key (lower runs first)
    pub priority: i64,
}

impl ListenerRef {
    pub fn new(function: impl Into<String>, priority: i64) -> Self {
        Self {
            function: function.into(),
            priority,
        }
    }
}

/// Side of a wrapped call a phased listener runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Runs before the wrapped function and may replace its arguments
    Before,
    /// Runs after the wrapped function and transforms its result
    After,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Phase::Before),
            "after" => Ok(Phase::After),
            other => Err(format!("unknown phase '{}' (expected before or after)", other)),
        }
    }
}

/// Shape of a hook's listener storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketLayout {
    /// One ordered list shared by actions and filters
    Simple,
    /// Independent `before` and `after` lists around one wrapped function
    Phased,
}

impl BucketLayout {
    /// Layout implied by registering with `phase`
    pub fn of(phase: Option<Phase>) -> Self {
        match phase {
            None => BucketLayout::Simple,
            Some(_) => BucketLayout::Phased,
        }
    }
}

impl fmt::Display for BucketLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketLayout::Simple => f.write_str("simple"),
            BucketLayout::Phased => f.write_str("phased"),
        }
    }
}

/// Listeners registered for one hook name
///
/// Serialized untagged: a simple bucket is a JSON array of listeners, a phased
/// bucket an object with `before` and `after` arrays. A phased object with any
/// other key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HookBucket {
    Simple(Vec<ListenerRef>),
    Phased {
        before: Vec<ListenerRef>,
        after: Vec<ListenerRef>,
    },
}

/// Wire form of a phased bucket
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PhasedLists {
    #[serde(default)]
    before: Vec<ListenerRef>,
    #[serde(default)]
    after: Vec<ListenerRef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BucketRepr {
    Simple(Vec<ListenerRef>),
    Phased(PhasedLists),
}

impl<'de> Deserialize<'de> for HookBucket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match BucketRepr::deserialize(deserializer)? {
            BucketRepr::Simple(list) => HookBucket::Simple(list),
            BucketRepr::Phased(PhasedLists { before, after }) => {
                HookBucket::Phased { before, after }
            }
        })
    }
}

impl HookBucket {
    /// Empty bucket with the layout implied by `phase`
    pub fn for_phase(phase: Option<Phase>) -> Self {
        match BucketLayout::of(phase) {
            BucketLayout::Simple => HookBucket::Simple(Vec::new()),
            BucketLayout::Phased => HookBucket::Phased {
                before: Vec::new(),
                after: Vec::new(),
            },
        }
    }

    pub fn layout(&self) -> BucketLayout {
        match self {
            HookBucket::Simple(_) => BucketLayout::Simple,
            HookBucket::Phased { .. } => BucketLayout::Phased,
        }
    }

    /// The ordered list for `phase`, or `None` when `phase` does not fit the layout
    pub fn list(&self, phase: Option<Phase>) -> Option<&[ListenerRef]> {
        match (self, phase) {
            (HookBucket::Simple(list), None) => Some(list),
            (HookBucket::Phased { before, .. }, Some(Phase::Before)) => Some(before),
            (HookBucket::Phased { after, .. }, Some(Phase::After)) => Some(after),
            _ => None,
        }
    }

    pub(crate) fn list_mut(&mut self, phase: Option<Phase>) -> Option<&mut Vec<ListenerRef>> {
        match (self, phase) {
            (HookBucket::Simple(list), None) => Some(list),
            (HookBucket::Phased { before, .. }, Some(Phase::Before)) => Some(before),
            (HookBucket::Phased { after, .. }, Some(Phase::After)) => Some(after),
            _ => None,
        }
    }

    /// Total registrations across every list in the bucket
    pub fn len(&self) -> usize {
        match self {
            HookBucket::Simple(list) => list.len(),
            HookBucket::Phased { before, after } => before.len() + after.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Positional and keyword arguments of a hook invocation
///
/// Values are JSON values so that listeners of any shape can share one
/// calling convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<Value>,

    /// Keyword arguments
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments made only of positional values
    pub fn positional<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            kwargs: Map::new(),
        }
    }

    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Positional argument at `index`
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Keyword argument named `key`
    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.kwargs.get(key)
    }

    /// Copy of these arguments with `value` inserted as the first positional
    pub fn prepended(&self, value: Value) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(value);
        args.extend(self.args.iter().cloned());
        Self {
            args,
            kwargs: self.kwargs.clone(),
        }
    }
}

/// What a `before` listener decided about the call's arguments
#[derive(Debug, Clone, PartialEq)]
pub enum BeforeOutcome {
    /// Use these arguments for the rest of the chain and the wrapped call
    Replace(Arguments),
    /// Keep the current arguments
    Unchanged,
}

/// Summary of one dispatch over a hook's listeners
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Hook that was dispatched
    pub hook: String,

    /// Listeners that were called
    pub invoked: usize,

    /// Registered names the resolver did not know
    pub unresolved: Vec<String>,

    /// Resolved listeners of the wrong kind for this dispatch mode
    pub skipped: Vec<String>,
}

impl DispatchReport {
    pub fn new(hook: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            ..Self::default()
        }
    }

    /// Whether every registered listener was resolved and called
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_simple_bucket_serializes_as_array() {
        let bucket = HookBucket::Simple(vec![ListenerRef::new("upper", 5)]);
        let value = serde_json::to_value(&bucket).unwrap();
        assert_eq!(value, json!([{ "function": "upper", "priority": 5 }]));
    }

    #[test]
    fn test_phased_bucket_deserializes_from_object() {
        let bucket: HookBucket =
            serde_json::from_value(json!({ "before": [{ "function": "up", "priority": 1 }] }))
                .unwrap();
        assert_eq!(bucket.layout(), BucketLayout::Phased);
        assert_eq!(bucket.list(Some(Phase::Before)).unwrap().len(), 1);
        assert!(bucket.list(Some(Phase::After)).unwrap().is_empty());
    }

    #[test]
    fn test_phased_bucket_rejects_unknown_key() {
        let result: serde_json::Result<HookBucket> = serde_json::from_value(
            json!({ "befor": [{ "function": "upper_arg", "priority": 5 }] }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_beyond_32_bits() {
        let listener: ListenerRef =
            serde_json::from_value(json!({ "function": "late", "priority": 5_000_000_000i64 }))
                .unwrap();
        assert_eq!(listener.priority, 5_000_000_000);
    }

    #[test]
    fn test_list_rejects_mismatched_phase() {
        let simple = HookBucket::for_phase(None);
        assert!(simple.list(Some(Phase::Before)).is_none());

        let phased = HookBucket::for_phase(Some(Phase::After));
        assert!(phased.list(None).is_none());
    }

    #[test]
    fn test_phase_parse() {
        assert_eq!("Before".parse::<Phase>().unwrap(), Phase::Before);
        assert_eq!("after".parse::<Phase>().unwrap(), Phase::After);
        assert!("during".parse::<Phase>().is_err());
    }

    #[test]
    fn test_prepended_keeps_kwargs() {
        let args = Arguments::positional(["b"]).with_kwarg("k", 1);
        let prepended = args.prepended(json!("a"));
        assert_eq!(prepended.args, vec![json!("a"), json!("b")]);
        assert_eq!(prepended.kwarg("k"), Some(&json!(1)));
    }
}
