use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Errors shared by every uberstead crate.
///
/// `FatalPrecondition` is the only variant the binary treats as an abort
/// request rather than an operation failure; it is never raised by the
/// configuration model itself.
#[derive(Error, Debug)]
pub enum UberError {
    Validation(String),
    DuplicateName(String),
    UnknownAttribute(String),
    Persistence { path: String, message: String },
    FatalPrecondition(String),
    Command(String),
    Dependency(String),
    Serialization(String),
    Io(#[from] std::io::Error),
    Other(#[from] anyhow::Error),
}

impl UberError {
    pub fn persistence(path: impl AsRef<std::path::Path>, message: impl Display) -> Self {
        UberError::Persistence {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, UberError::FatalPrecondition(_))
    }
}

impl Display for UberError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UberError::Validation(s) => write!(f, "Validation error: {}", s),
            UberError::DuplicateName(name) => {
                write!(f, "A site named '{}' already exists", name)
            }
            UberError::UnknownAttribute(attr) => write!(
                f,
                "Unknown site attribute '{}' (expected one of: name, domain, directory, webroot)",
                attr
            ),
            UberError::Persistence { path, message } => {
                write!(f, "Failed to persist {}: {}", path, message)
            }
            UberError::FatalPrecondition(s) => write!(f, "{}", s),
            UberError::Command(s) => write!(f, "Command failed: {}", s),
            UberError::Dependency(s) => write!(f, "Dependency not found: {}", s),
            UberError::Serialization(s) => write!(f, "Serialization error: {}", s),
            UberError::Io(e) => write!(f, "I/O error: {}", e),
            UberError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl From<serde_yaml_ng::Error> for UberError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        UberError::Serialization(err.to_string())
    }
}

impl From<dialoguer::Error> for UberError {
    fn from(err: dialoguer::Error) -> Self {
        UberError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
    }
}

pub type Result<T> = std::result::Result<T, UberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_precondition_errors_are_fatal() {
        assert!(UberError::FatalPrecondition("Aborting.".into()).is_fatal());
        assert!(!UberError::Validation("bad".into()).is_fatal());
        assert!(!UberError::DuplicateName("blog".into()).is_fatal());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            UberError::DuplicateName("blog".into()).to_string(),
            "A site named 'blog' already exists"
        );
        assert_eq!(
            UberError::persistence("/tmp/uberstead.yaml", "disk full").to_string(),
            "Failed to persist /tmp/uberstead.yaml: disk full"
        );
        assert_eq!(
            UberError::FatalPrecondition("Aborting.".into()).to_string(),
            "Aborting."
        );
        assert!(UberError::UnknownAttribute("color".into())
            .to_string()
            .contains("'color'"));
    }
}
