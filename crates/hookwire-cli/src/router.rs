// Command routing and dispatch

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hookwire_hooks::{
    config::{ConfigLoader, HooksConfig},
    types::Phase,
    HookCli, HookCommand,
};
use tracing::debug;

/// Hookwire - inspect and edit a persisted hook registry
#[derive(Parser, Debug)]
#[command(name = "hookwire")]
#[command(bin_name = "hookwire")]
#[command(about = "Inspect and edit a persisted hook registry")]
#[command(
    long_about = "Hookwire: named hooks with priority-ordered listeners.\n\nThe hook file (hooks.json by default) maps each hook name to its listeners.\nListeners are stored by name and resolved by the host application when a hook fires.\n\nQuick Start:\n  • hookwire list                         Show every hook\n  • hookwire register greet upper -p 5    Add a listener\n  • hookwire inspect greet                Show one hook in run order"
)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Hook file to operate on (overrides configuration)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Configuration file to load instead of the user/project hierarchy
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every hook and its listeners
    #[command(about = "List every hook and its listeners in run order")]
    List,

    /// Show one hook
    #[command(about = "Show one hook's listeners in run order")]
    Inspect {
        /// Hook name
        #[arg(value_name = "HOOK")]
        hook: String,
    },

    /// Register a listener on a hook
    #[command(about = "Register a listener on a hook")]
    Register {
        /// Hook name
        #[arg(value_name = "HOOK")]
        hook: String,

        /// Listener name, resolved by the host application
        #[arg(value_name = "LISTENER")]
        listener: String,

        /// Priority (lower runs first; configured default when omitted)
        #[arg(short, long, allow_negative_numbers = true)]
        priority: Option<i64>,

        /// Register around a wrapped function (before or after)
        #[arg(long)]
        phase: Option<Phase>,
    },

    /// Remove every registration of a listener
    #[command(about = "Remove every registration of a listener from a hook")]
    Unregister {
        /// Hook name
        #[arg(value_name = "HOOK")]
        hook: String,

        /// Listener name
        #[arg(value_name = "LISTENER")]
        listener: String,

        /// Phase of a wrapped-function hook (before or after)
        #[arg(long)]
        phase: Option<Phase>,
    },

    /// Remove a hook
    #[command(about = "Remove a hook and all of its listeners")]
    Clear {
        /// Hook name
        #[arg(value_name = "HOOK")]
        hook: String,
    },
}

impl Cli {
    /// Library command for the parsed subcommand
    pub fn hook_command(&self) -> HookCommand {
        let format = self.json.then(|| "json".to_string());
        match self.command.clone() {
            Commands::List => HookCommand::List { format },
            Commands::Inspect { hook } => HookCommand::Inspect { hook, format },
            Commands::Register {
                hook,
                listener,
                priority,
                phase,
            } => HookCommand::Register {
                hook,
                listener,
                priority,
                phase,
            },
            Commands::Unregister {
                hook,
                listener,
                phase,
            } => HookCommand::Unregister {
                hook,
                listener,
                phase,
            },
            Commands::Clear { hook } => HookCommand::Clear { hook },
        }
    }

    /// Configuration selected by `--config`/`--file`, or the default hierarchy
    pub fn load_config(&self) -> Result<HooksConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Configuration file not found: {}", path.display());
                }
                ConfigLoader::load_from_path(path)
                    .with_context(|| format!("Failed to load configuration {}", path.display()))?
            }
            None => ConfigLoader::load().context("Failed to load configuration")?,
        };

        if let Some(file) = &self.file {
            config.state_file = file.clone();
        }

        Ok(config)
    }
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to the command
    pub fn route() -> Result<()> {
        let cli = Cli::parse();

        crate::logging::init_logging(cli.verbose, cli.quiet);

        let output = Self::execute(&cli)?;
        println!("{}", output);
        Ok(())
    }

    /// Execute a parsed command, returning the text to print
    pub fn execute(cli: &Cli) -> Result<String> {
        let config = cli.load_config()?;
        debug!(state_file = %config.state_file.display(), "Using hook file");

        let registry = config.open_registry().with_context(|| {
            format!("Failed to open hook file {}", config.state_file.display())
        })?;

        HookCli::new(registry)
            .execute(cli.hook_command())
            .context("Hook command failed")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn test_parse_register_with_options() {
        let cli = parse(&[
            "hookwire", "register", "proc", "star", "--priority", "-3", "--phase", "after",
        ]);

        assert_eq!(
            cli.command,
            Commands::Register {
                hook: "proc".to_string(),
                listener: "star".to_string(),
                priority: Some(-3),
                phase: Some(Phase::After),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_phase() {
        let result = Cli::try_parse_from(["hookwire", "register", "h", "l", "--phase", "during"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["hookwire", "list", "--json", "-v"]);

        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.hook_command(), HookCommand::List {
            format: Some("json".to_string())
        });
    }

    #[test]
    fn test_hook_command_mapping() {
        let cli = parse(&["hookwire", "unregister", "greet", "upper"]);
        assert_eq!(
            cli.hook_command(),
            HookCommand::Unregister {
                hook: "greet".to_string(),
                listener: "upper".to_string(),
                phase: None,
            }
        );

        let cli = parse(&["hookwire", "inspect", "greet"]);
        assert_eq!(
            cli.hook_command(),
            HookCommand::Inspect {
                hook: "greet".to_string(),
                format: None,
            }
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        let cli = parse(&["hookwire", "--config", missing.to_str().unwrap(), "list"]);

        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_file_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, "state_file: configured.json\ndefault_priority: 2\n").unwrap();
        let file = dir.path().join("chosen.json");

        let cli = parse(&[
            "hookwire",
            "--config",
            config_path.to_str().unwrap(),
            "--file",
            file.to_str().unwrap(),
            "list",
        ]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.state_file, file);
        assert_eq!(config.default_priority, 2);
    }

    #[test]
    fn test_execute_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, "state_file: hooks.json\n").unwrap();
        let config = config_path.to_str().unwrap();

        let run = |args: &[&str]| {
            let mut full = vec!["hookwire", "--config", config];
            full.extend_from_slice(args);
            CommandRouter::execute(&parse(&full))
        };

        run(&["register", "greet", "shout", "-p", "10"]).unwrap();
        run(&["register", "greet", "upper", "-p", "5"]).unwrap();

        let listed = run(&["list"]).unwrap();
        assert!(listed.contains("upper(5), shout(10)"));

        let json = run(&["inspect", "greet", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["function"], "upper");

        assert!(dir.path().join("hooks.json").exists());
        assert!(run(&["clear", "missing"]).is_err());
    }
}
