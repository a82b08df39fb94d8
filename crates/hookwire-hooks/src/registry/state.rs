//! Hook name to listener mapping held by a registry and written by a store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{HooksError, Result},
    types::{BucketLayout, HookBucket, ListenerRef, Phase},
};

/// Full registry contents
///
/// Every listener list is kept sorted ascending by priority. The sort is
/// stable, so equal priorities run in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryState {
    hooks: BTreeMap<String, HookBucket>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list for `hook`/`phase` and re-sort that list
    ///
    /// The first registration on a hook fixes its layout.
    pub fn insert(&mut self, hook: &str, listener: ListenerRef, phase: Option<Phase>) -> Result<()> {
        check_hook_name(hook)?;
        check_listener_name(hook, &listener.function)?;

        let bucket = self
            .hooks
            .entry(hook.to_string())
            .or_insert_with(|| HookBucket::for_phase(phase));
        let layout = bucket.layout();
        let list = bucket
            .list_mut(phase)
            .ok_or_else(|| HooksError::LayoutMismatch {
                hook: hook.to_string(),
                expected: layout,
                found: BucketLayout::of(phase),
            })?;

        list.push(listener);
        list.sort_by_key(|l| l.priority);
        Ok(())
    }

    /// Remove every registration of `function` from the list for `hook`/`phase`
    ///
    /// Returns how many were removed. A hook left without listeners is dropped.
    pub fn remove(&mut self, hook: &str, function: &str, phase: Option<Phase>) -> Result<usize> {
        let bucket = self
            .hooks
            .get_mut(hook)
            .ok_or_else(|| HooksError::HookNotFound(hook.to_string()))?;
        let layout = bucket.layout();
        let list = bucket
            .list_mut(phase)
            .ok_or_else(|| HooksError::LayoutMismatch {
                hook: hook.to_string(),
                expected: layout,
                found: BucketLayout::of(phase),
            })?;

        let before = list.len();
        list.retain(|l| l.function != function);
        let removed = before - list.len();

        if bucket.is_empty() {
            self.hooks.remove(hook);
        }
        Ok(removed)
    }

    /// Drop the whole bucket for `hook`
    pub fn remove_hook(&mut self, hook: &str) -> Result<HookBucket> {
        self.hooks
            .remove(hook)
            .ok_or_else(|| HooksError::HookNotFound(hook.to_string()))
    }

    pub fn bucket(&self, hook: &str) -> Option<&HookBucket> {
        self.hooks.get(hook)
    }

    /// Ordered listeners for `hook`/`phase`; empty for unknown hooks or a phase
    /// that does not match the hook's layout
    pub fn entries(&self, hook: &str, phase: Option<Phase>) -> &[ListenerRef] {
        self.hooks
            .get(hook)
            .and_then(|bucket| bucket.list(phase))
            .unwrap_or(&[])
    }

    /// Re-sort every list, for state that was not built through [`insert`](Self::insert)
    pub fn sort_lists(&mut self) {
        for bucket in self.hooks.values_mut() {
            match bucket {
                HookBucket::Simple(list) => list.sort_by_key(|l| l.priority),
                HookBucket::Phased { before, after } => {
                    before.sort_by_key(|l| l.priority);
                    after.sort_by_key(|l| l.priority);
                }
            }
        }
    }

    /// Check every hook and listener name, for state that was not built
    /// through [`insert`](Self::insert)
    pub fn validate(&self) -> Result<()> {
        for (hook, bucket) in &self.hooks {
            check_hook_name(hook)?;
            let listeners: Vec<&ListenerRef> = match bucket {
                HookBucket::Simple(list) => list.iter().collect(),
                HookBucket::Phased { before, after } => before.iter().chain(after).collect(),
            };
            for listener in listeners {
                check_listener_name(hook, &listener.function)?;
            }
        }
        Ok(())
    }

    pub fn hook_names(&self) -> Vec<String> {
        self.hooks.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HookBucket)> {
        self.hooks.iter()
    }

    /// Number of hook names
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

fn check_hook_name(hook: &str) -> Result<()> {
    if hook.is_empty() {
        return Err(HooksError::InvalidListener(
            "hook name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn check_listener_name(hook: &str, function: &str) -> Result<()> {
    if function.is_empty() {
        return Err(HooksError::InvalidListener(format!(
            "listener name for hook '{}' must not be empty",
            hook
        )));
    }
    Ok(())
}
