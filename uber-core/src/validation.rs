//! Validation rules shared by the configuration model and the prompt layer.
//!
//! Every function returns `UberError::Validation` with a message suitable for
//! showing to the user directly.

use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::{Result, UberError};

/// Validate a hostname according to RFC 1123 rules.
///
/// Labels are 1-63 characters of `[a-zA-Z0-9-]`, may not start or end with a
/// hyphen, and the whole name is at most 253 characters.
pub fn validate_hostname(hostname: &str) -> Result<()> {
    if hostname.is_empty() || hostname.len() > 253 {
        return Err(UberError::Validation(
            "Hostname must be between 1 and 253 characters".to_string(),
        ));
    }

    if hostname.starts_with('.') || hostname.ends_with('.') {
        return Err(UberError::Validation(
            "Hostname cannot start or end with a dot".to_string(),
        ));
    }

    for label in hostname.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(UberError::Validation(
                "Hostname labels must be between 1 and 63 characters".to_string(),
            ));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(UberError::Validation(
                "Hostname labels cannot start or end with a hyphen".to_string(),
            ));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(UberError::Validation(format!(
                "Hostname label '{}' contains invalid characters (only alphanumeric and '-' allowed)",
                label
            )));
        }
    }

    Ok(())
}

/// Validate an IPv4 address in dotted-quad form.
pub fn validate_ipv4(ip: &str) -> Result<()> {
    ip.trim()
        .parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| UberError::Validation(format!("'{}' is not a valid IPv4 address", ip)))
}

/// A site name must contain something other than whitespace.
pub fn validate_site_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(UberError::Validation(
            "Site name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_directory_exists(directory: &str) -> Result<()> {
    if directory.is_empty() || !Path::new(directory).exists() {
        return Err(UberError::Validation(format!(
            "Directory '{}' does not exist",
            directory
        )));
    }
    Ok(())
}

/// Parse a whole number, tolerating surrounding whitespace.
pub fn parse_integer(field: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        UberError::Validation(format!("{} must be a whole number, got '{}'", field, value))
    })
}
