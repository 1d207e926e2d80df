//! Creating a site's database on the machine.

use tracing::{debug, info};
use uber_core::command_stream::{is_tool_installed, shell_escape, ProcessRunner};
use uber_core::error::{Result, UberError};
use uber_messages::{msg, MESSAGES};

use crate::progress::run_with_progress;

/// Lines the `mysql` client prints for a single statement, for sizing the bar.
const EXPECTED_OUTPUT_LINES: u64 = 1;

pub trait DatabaseClient {
    /// Create the database `name` unless it already exists.
    fn create_database(&self, host: &str, user: &str, password: &str, name: &str) -> Result<()>;
}

/// `DatabaseClient` that drives the `mysql` command-line client.
pub struct MysqlCliClient {
    runner: Box<dyn ProcessRunner>,
    verbose: bool,
}

impl MysqlCliClient {
    pub fn new(runner: Box<dyn ProcessRunner>, verbose: bool) -> Self {
        Self { runner, verbose }
    }
}

impl DatabaseClient for MysqlCliClient {
    fn create_database(&self, host: &str, user: &str, password: &str, name: &str) -> Result<()> {
        if !is_tool_installed("mysql") {
            return Err(UberError::Dependency(
                "The mysql client is not installed".to_string(),
            ));
        }

        let command_line = create_database_command(host, user, password, name);
        debug!(host, user, database = name, "creating database");

        let status = run_with_progress(
            self.runner.as_ref(),
            &command_line,
            EXPECTED_OUTPUT_LINES,
            self.verbose,
        )?;
        if !status.success() {
            return Err(UberError::Command(msg!(
                MESSAGES.common.command_failed,
                command = "mysql",
                status = status.to_string()
            )));
        }

        info!(host, database = name, "database ready");
        Ok(())
    }
}

/// The `mysql` invocation for `CREATE DATABASE IF NOT EXISTS`.
pub fn create_database_command(host: &str, user: &str, password: &str, name: &str) -> String {
    let statement = format!(
        "CREATE DATABASE IF NOT EXISTS `{}`",
        name.replace('`', "``")
    );
    format!(
        "mysql --host={} --user={} --password={} --execute={}",
        shell_escape(host),
        shell_escape(user),
        shell_escape(password),
        shell_escape(&statement)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_database_command() {
        assert_eq!(
            create_database_command("192.168.10.10", "homestead", "secret", "my_blog"),
            "mysql --host=192.168.10.10 --user=homestead --password=secret \
             --execute='CREATE DATABASE IF NOT EXISTS `my_blog`'"
        );
    }

    #[test]
    fn test_create_database_command_quotes_password() {
        let command = create_database_command("127.0.0.1", "root", "it's secret", "shop");
        assert!(command.contains("--password='it'\"'\"'s secret'"));
    }
}
