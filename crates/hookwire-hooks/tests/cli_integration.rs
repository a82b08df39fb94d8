//! Integration tests for the command layer over a hook file

use hookwire_hooks::*;
use tempfile::TempDir;

fn file_cli(dir: &TempDir) -> HookCli<StoredHookRegistry> {
    let store = JsonFileStore::new(dir.path().join("hooks.json"));
    HookCli::new(StoredHookRegistry::open(store).unwrap())
}

#[test]
fn test_hook_registration_and_listing() {
    let dir = TempDir::new().unwrap();
    let cli = file_cli(&dir);

    cli.execute(cli::register_listener("greet", "shout", 10)).unwrap();
    cli.execute(cli::register_listener("greet", "upper", 5)).unwrap();

    let result = cli.execute(HookCommand::List { format: None }).unwrap();
    assert!(result.contains("greet"));
    assert!(result.contains("upper(5), shout(10)"));
}

#[test]
fn test_commands_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let cli = file_cli(&dir);
        cli.execute(HookCommand::Register {
            hook: "process".to_string(),
            listener: "upper_arg".to_string(),
            priority: Some(5),
            phase: Some(Phase::Before),
        })
        .unwrap();
        cli.execute(HookCommand::Register {
            hook: "process".to_string(),
            listener: "star".to_string(),
            priority: None,
            phase: Some(Phase::After),
        })
        .unwrap();
    }

    let cli = file_cli(&dir);
    let result = cli.execute(cli::inspect_hook("process")).unwrap();

    assert!(result.contains("phased"));
    assert!(result.contains("upper_arg"));
    assert!(result.contains("priority 10"));
}

#[test]
fn test_hook_inspection_json() {
    let dir = TempDir::new().unwrap();
    let cli = file_cli(&dir);
    cli.execute(cli::register_listener("greet", "upper", 5)).unwrap();

    let result = cli.execute(cli::inspect_hook_json("greet")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result).unwrap();

    assert_eq!(value, serde_json::json!([{ "function": "upper", "priority": 5 }]));
}

#[test]
fn test_layout_mismatch_is_reported() {
    let dir = TempDir::new().unwrap();
    let cli = file_cli(&dir);
    cli.execute(cli::register_listener("greet", "upper", 5)).unwrap();

    let result = cli.execute(HookCommand::Register {
        hook: "greet".to_string(),
        listener: "star".to_string(),
        priority: Some(1),
        phase: Some(Phase::After),
    });

    assert!(matches!(result, Err(HooksError::LayoutMismatch { .. })));
    assert_eq!(cli.registry().listeners("greet", None), vec!["upper"]);
}

#[test]
fn test_unregister_and_clear() {
    let dir = TempDir::new().unwrap();
    let cli = file_cli(&dir);
    cli.execute(cli::register_listener("log", "audit", 1)).unwrap();
    cli.execute(cli::register_listener("log", "audit", 2)).unwrap();
    cli.execute(cli::register_listener("save", "backup", 1)).unwrap();

    let removed = cli.execute(cli::unregister_listener("log", "audit")).unwrap();
    assert!(removed.contains("Removed 2"));

    cli.execute(cli::clear_hook("save")).unwrap();
    assert_eq!(
        cli.execute(cli::list_hooks()).unwrap(),
        "No hooks found"
    );
    assert!(cli.execute(cli::clear_hook("save")).is_err());
}
