//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`origin`], [`proxy`], or [`health`]. Each
//! handler lives in its own submodule.

pub mod health;
pub mod origin;
pub mod proxy;

use crate::cli::{Cli, Commands};
use crate::error::RelayError;

pub async fn dispatch(cli: Cli) -> Result<(), RelayError> {
    match cli.command {
        Some(Commands::Origin(args)) => origin::execute(args).await,
        Some(Commands::Proxy(args)) => proxy::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  apirelay v{version} \u{2014} HTTP pass-through relay demo\n\n  \
         No command provided. To get started:\n\n    \
         apirelay origin                   Start the origin service on :3000\n    \
         apirelay proxy                    Start the forwarding proxy on :3001\n    \
         apirelay health                   Probe a running instance\n    \
         apirelay --help                   See all commands and options\n"
    );
}
