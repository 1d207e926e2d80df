// Command handlers

use tracing::debug;
use uber_core::error::Result;
use uber_core::preconditions::{invoking_home, require_root, require_ssh_key};

use crate::cli::{Args, Command, SitesSubcommand};
use crate::context::AppContext;

pub mod configure;
pub mod sites;

/// Main command dispatcher
pub fn execute_command(args: &Args) -> Result<()> {
    let mut ctx = AppContext::from_args(args)?;
    debug!(config = %ctx.config.location().display(), "dispatching command");

    match &args.command {
        Command::Configure => {
            require_machine_access()?;
            configure::handle_configure(&mut ctx)
        }
        Command::Sites { command } => match command {
            SitesSubcommand::Add(add) => {
                require_machine_access()?;
                sites::handle_add(&mut ctx, add)
            }
            SitesSubcommand::Delete { name } => {
                require_machine_access()?;
                sites::handle_delete(&mut ctx, name)
            }
            SitesSubcommand::List { attribute } => {
                sites::handle_list(&mut ctx, attribute.as_deref())
            }
            SitesSubcommand::HostsRow => sites::handle_hosts_row(&mut ctx),
        },
    }
}

/// Commands that write machine state run as root and need the user's ssh key.
fn require_machine_access() -> Result<()> {
    require_root()?;
    require_ssh_key(&invoking_home()?)?;
    Ok(())
}
