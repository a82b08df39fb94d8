// Hookwire CLI entry point

use hookwire_cli::router::CommandRouter;

fn main() {
    if let Err(e) = CommandRouter::route() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
