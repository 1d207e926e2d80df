// Machine settings command handler

use uber_core::error::Result;
use uber_core::uber_success;
use uber_messages::{msg, MESSAGES};

use crate::context::AppContext;

/// Ask for the machine's IP, memory and CPU count and save them.
pub fn handle_configure(ctx: &mut AppContext) -> Result<()> {
    ctx.config.update_config(ctx.prompter.as_ref(), true)?;
    uber_success!(
        "{}",
        msg!(
            MESSAGES.config.saved,
            path = ctx.config.location().display().to_string()
        )
    );
    Ok(())
}
