use sift_config::SiftConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &SiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Build(args) => commands::build::handle(args, config, flags),
        Commands::Preview(args) => commands::preview::handle(args, config, flags),
        Commands::List => commands::list::handle(config, flags),
        Commands::Validate(_) => unreachable!("validate is pre-dispatched in main"),
    }
}
