//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::OnehopError;

pub async fn dispatch(cli: Cli) -> Result<(), OnehopError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
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
        "\n  onehop v{version} \u{2014} single-target streaming HTTP reverse proxy\n\n  \
         No command provided. To get started:\n\n    \
         TARGET=http://backend:9000 onehop run    Start forwarding to one upstream\n    \
         onehop run -t http://backend:9000        Same, via flags\n    \
         onehop health                            Probe a running instance\n    \
         onehop --help                            See all commands and options\n"
    );
}
