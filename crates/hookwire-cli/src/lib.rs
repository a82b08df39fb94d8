//! Hookwire CLI
//!
//! Command-line front end over a persisted hook file: list and inspect hooks,
//! register and unregister listeners, clear hooks.

pub mod logging;
pub mod router;

pub use router::{Cli, CommandRouter, Commands};
