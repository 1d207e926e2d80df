//! Checks that must pass before a command touches machine state.
//!
//! Failures are reported as `UberError::FatalPrecondition`; the binary prints
//! the message and exits with a non-zero status.

use std::path::{Path, PathBuf};

use tracing::debug;
use uber_messages::MESSAGES;

use crate::error::{Result, UberError};

/// The command must run with an effective uid of 0.
pub fn require_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(UberError::FatalPrecondition(
            MESSAGES.common.root_required.to_string(),
        ))
    }
}

#[cfg(unix)]
pub fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// The user needs an RSA public key for the guest to authorize.
pub fn require_ssh_key(home: &Path) -> Result<PathBuf> {
    let key = home.join(".ssh").join("id_rsa.pub");
    debug!(key = %key.display(), "checking for ssh public key");
    if key.exists() {
        Ok(key)
    } else {
        Err(UberError::FatalPrecondition(
            MESSAGES.common.ssh_key_missing.to_string(),
        ))
    }
}

/// The user on whose behalf the command runs: `SUDO_USER` when elevated
/// through sudo, `None` otherwise.
pub fn invoking_user() -> Option<String> {
    std::env::var("SUDO_USER")
        .ok()
        .filter(|user| !user.trim().is_empty() && user != "root")
}

/// Home directory of the invoking user, falling back to the current user's.
pub fn invoking_home() -> Result<PathBuf> {
    if let Some(home) = invoking_user().and_then(|user| home_of(&user)) {
        return Ok(home);
    }
    dirs::home_dir()
        .ok_or_else(|| UberError::FatalPrecondition("Cannot determine home directory".to_string()))
}

#[cfg(unix)]
fn home_of(user: &str) -> Option<PathBuf> {
    nix::unistd::User::from_name(user)
        .ok()
        .flatten()
        .map(|account| account.dir)
}

#[cfg(not(unix))]
fn home_of(_user: &str) -> Option<PathBuf> {
    None
}
