//! Property-based tests for reopening a hook file in a new registry

use proptest::prelude::*;
use hookwire_hooks::*;
use tempfile::TempDir;

/// Registrations on a fixed set of hooks; hooks starting with `wrap_` are phased
fn registration_strategy() -> impl Strategy<Value = (String, String, i64, Option<Phase>)> {
    (
        prop_oneof![Just("init"), Just("render"), Just("wrap_save"), Just("wrap_load")],
        "[a-z][a-z0-9_]{0,12}",
        any::<i64>(),
        prop_oneof![Just(Phase::Before), Just(Phase::After)],
    )
        .prop_map(|(hook, listener, priority, phase)| {
            let phase = hook.starts_with("wrap_").then_some(phase);
            (hook.to_string(), listener, priority, phase)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every registration survives a save and a reopen through a second store
    #[test]
    fn prop_registrations_survive_reopen(
        registrations in prop::collection::vec(registration_strategy(), 0..16),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.json");

        let writer = StoredHookRegistry::open(JsonFileStore::new(&path)).unwrap();
        for (hook, listener, priority, phase) in &registrations {
            writer.register(hook, listener, *priority, *phase).unwrap();
        }

        let reader = StoredHookRegistry::open(JsonFileStore::new(&path).with_pretty(false)).unwrap();
        prop_assert_eq!(reader.snapshot(), writer.snapshot());

        for (hook, listener, _, phase) in &registrations {
            prop_assert!(reader.listeners(hook, *phase).contains(listener));
        }
    }
}
