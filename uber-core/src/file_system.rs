//! Permission and ownership changes for files the tool writes on behalf of
//! the invoking user.

use std::path::Path;

use crate::error::{Result, UberError};

/// Sets permission bits and owner on a file.
pub trait FileAccess {
    fn chmod(&self, path: &Path, mode: u32) -> Result<()>;
    fn chown(&self, path: &Path, user: &str) -> Result<()>;
}

/// `FileAccess` backed by the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFileAccess;

#[cfg(unix)]
impl FileAccess for HostFileAccess {
    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .map_err(|e| UberError::persistence(path, format!("chmod {:o} failed: {}", mode, e)))
    }

    fn chown(&self, path: &Path, user: &str) -> Result<()> {
        use nix::unistd::{chown, User};

        let account = User::from_name(user)
            .map_err(|e| UberError::persistence(path, format!("cannot look up user '{}': {}", user, e)))?
            .ok_or_else(|| UberError::persistence(path, format!("unknown user '{}'", user)))?;

        chown(path, Some(account.uid), Some(account.gid))
            .map_err(|e| UberError::persistence(path, format!("chown {} failed: {}", user, e)))
    }
}

#[cfg(not(unix))]
impl FileAccess for HostFileAccess {
    fn chmod(&self, _path: &Path, _mode: u32) -> Result<()> {
        Ok(())
    }

    fn chown(&self, _path: &Path, _user: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_chmod_sets_mode() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("uberstead.yaml");
        std::fs::write(&file, "ip: 10.0.0.5\n").unwrap();

        HostFileAccess.chmod(&file, 0o664).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }

    #[test]
    fn test_chmod_missing_file_is_persistence_error() {
        let err = HostFileAccess
            .chmod(Path::new("/definitely/not/here/uberstead.yaml"), 0o664)
            .unwrap_err();
        assert!(matches!(err, UberError::Persistence { .. }));
    }

    #[test]
    fn test_chown_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("uberstead.yaml");
        std::fs::write(&file, "").unwrap();

        let err = HostFileAccess
            .chown(&file, "no-such-user-uberstead-test")
            .unwrap_err();
        assert!(matches!(err, UberError::Persistence { .. }));
    }
}
