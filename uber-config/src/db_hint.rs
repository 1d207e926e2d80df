//! Database connection hints written into a project's `parameters.yml`.
//!
//! Hint lines are owned by the marker prefix: every line containing it is
//! removed before a fresh set is appended, so rewriting is idempotent. The
//! marker is never parsed as YAML.

// Standard library
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// External crates
use regex::Regex;
use tracing::{debug, info};
use uber_core::error::{Result, UberError};

pub const HINT_MARKER: &str = "#Uberstead Config Hint#    ";
pub const DATABASE_HOST: &str = "127.0.0.1";
pub const DATABASE_PORT: u16 = 3306;
pub const DATABASE_USER: &str = "homestead";
pub const DATABASE_PASSWORD: &str = "secret";

static DISALLOWED_CHARS_RE: OnceLock<Regex> = OnceLock::new();

fn disallowed_chars_regex() -> &'static Regex {
    DISALLOWED_CHARS_RE.get_or_init(|| {
        Regex::new(r"[^a-zA-Z0-9_]+").expect("Hardcoded database name pattern should always compile")
    })
}

/// Database identifier for a site: spaces become underscores, anything
/// outside `[a-zA-Z0-9_]` is dropped, and the result is lower-cased.
pub fn database_name_for(site_name: &str) -> String {
    let underscored = site_name.replace(' ', "_");
    disallowed_chars_regex()
        .replace_all(&underscored, "")
        .to_lowercase()
}

/// `<directory>/app/config/parameters.yml`
pub fn parameters_path(directory: &Path) -> PathBuf {
    directory.join("app").join("config").join("parameters.yml")
}

pub fn hint_lines(database_name: &str) -> [String; 5] {
    [
        format!("{HINT_MARKER}database_host: {DATABASE_HOST}"),
        format!("{HINT_MARKER}database_port: {DATABASE_PORT}"),
        format!("{HINT_MARKER}database_name: {database_name}"),
        format!("{HINT_MARKER}database_user: {DATABASE_USER}"),
        format!("{HINT_MARKER}database_password: {DATABASE_PASSWORD}"),
    ]
}

/// Strip earlier hint lines from `contents` and append a fresh set.
///
/// Every other line is kept byte-for-byte, line ending included. The hint
/// lines end in `\n`.
pub fn apply_hint(contents: &str, database_name: &str) -> String {
    let mut rewritten: String = contents
        .split_inclusive('\n')
        .filter(|line| !line.contains(HINT_MARKER))
        .collect();

    if !rewritten.is_empty() && !rewritten.ends_with('\n') {
        rewritten.push('\n');
    }
    for hint in hint_lines(database_name) {
        rewritten.push_str(&hint);
        rewritten.push('\n');
    }
    rewritten
}

/// Rewrite the hint block in `<directory>/app/config/parameters.yml`.
///
/// Returns the path that was rewritten, or `None` when the project has no
/// such file.
pub fn write_database_hint(directory: &Path, database_name: &str) -> Result<Option<PathBuf>> {
    let path = parameters_path(directory);
    if !path.is_file() {
        debug!(path = %path.display(), "no parameters.yml, skipping database hint");
        return Ok(None);
    }

    let contents = fs::read_to_string(&path).map_err(|e| UberError::persistence(&path, e))?;
    fs::write(&path, apply_hint(&contents, database_name))
        .map_err(|e| UberError::persistence(&path, e))?;

    info!(path = %path.display(), database = database_name, "wrote database hint");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMETERS: &str = "parameters:\n    database_driver: pdo_mysql\n    database_host: 127.0.0.1\n";

    #[test]
    fn test_database_name_for() {
        assert_eq!(database_name_for("Blog"), "blog");
        assert_eq!(database_name_for("My Blog"), "my_blog");
        assert_eq!(database_name_for("shop-2.0!"), "shop20");
        assert_eq!(database_name_for("already_fine_1"), "already_fine_1");
        assert_eq!(database_name_for("  spaced  "), "__spaced__");
    }

    #[test]
    fn test_parameters_path() {
        assert_eq!(
            parameters_path(Path::new("/srv/blog")),
            PathBuf::from("/srv/blog/app/config/parameters.yml")
        );
    }

    #[test]
    fn test_apply_hint_appends_five_lines() {
        let rewritten = apply_hint(PARAMETERS, "blog");
        assert!(rewritten.starts_with(PARAMETERS));
        assert_eq!(rewritten.matches(HINT_MARKER).count(), 5);
        assert!(rewritten.ends_with(&format!("{HINT_MARKER}database_password: secret\n")));
        assert!(rewritten.contains(&format!("{HINT_MARKER}database_name: blog\n")));
    }

    #[test]
    fn test_apply_hint_is_idempotent() {
        let once = apply_hint(PARAMETERS, "blog");
        let twice = apply_hint(&once, "blog");
        assert_eq!(once, twice);
        assert_eq!(twice.matches(HINT_MARKER).count(), 5);
    }

    #[test]
    fn test_apply_hint_replaces_old_name() {
        let first = apply_hint(PARAMETERS, "old");
        let second = apply_hint(&first, "new");
        assert!(!second.contains("database_name: old"));
        assert!(second.contains(&format!("{HINT_MARKER}database_name: new")));
    }

    #[test]
    fn test_apply_hint_without_trailing_newline() {
        let rewritten = apply_hint("parameters: ~", "blog");
        assert!(rewritten.starts_with("parameters: ~\n#Uberstead"));
    }

    #[test]
    fn test_apply_hint_keeps_blank_lines() {
        let rewritten = apply_hint("\n\nparameters: ~\n\n", "blog");
        assert!(rewritten.starts_with(&format!("\n\nparameters: ~\n\n{HINT_MARKER}")));
        assert!(!rewritten.ends_with("\n\n"));
    }

    #[test]
    fn test_apply_hint_keeps_crlf_line_endings() {
        let contents = "parameters:\r\n    locale: en\r\n";
        let rewritten = apply_hint(contents, "blog");
        assert!(rewritten.starts_with(contents));
        assert_eq!(rewritten.matches("\r\n").count(), 2);

        // old hints are dropped whatever their line ending
        let stale = format!("{contents}{HINT_MARKER}database_name: old\r\n");
        assert_eq!(apply_hint(&stale, "blog"), rewritten);
    }

    #[test]
    fn test_apply_hint_on_empty_file() {
        let rewritten = apply_hint("", "blog");
        assert!(rewritten.starts_with(HINT_MARKER));
        assert_eq!(rewritten.lines().count(), 5);
    }

    #[test]
    fn test_write_database_hint_twice() {
        let project = tempfile::tempdir().unwrap();
        let path = parameters_path(project.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, PARAMETERS).unwrap();

        let written = write_database_hint(project.path(), "blog").unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        write_database_hint(project.path(), "blog").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        for line in hint_lines("blog") {
            assert_eq!(contents.matches(line.as_str()).count(), 1, "{line}");
        }
    }

    #[test]
    fn test_write_database_hint_without_file() {
        let project = tempfile::tempdir().unwrap();
        assert_eq!(write_database_hint(project.path(), "blog").unwrap(), None);
        assert!(!parameters_path(project.path()).exists());
    }
}
