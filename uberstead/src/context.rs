//! Services a command needs, built once in `main` and passed down.

use std::path::PathBuf;

use anyhow::Context;
use uber_config::{ConfigManager, ManagerSettings, YamlFileStore};
use uber_core::command_stream::ShellRunner;
use uber_core::error::Result;
use uber_core::file_system::HostFileAccess;
use uber_core::preconditions::invoking_user;
use uber_core::prompt::{Prompter, TerminalPrompter};

use crate::cli::Args;
use crate::database::{DatabaseClient, MysqlCliClient};

pub const DEFAULT_DOCUMENT: &str = "uberstead.yaml";

pub struct AppContext {
    pub config: ConfigManager,
    pub prompter: Box<dyn Prompter>,
    pub database: Box<dyn DatabaseClient>,
}

impl AppContext {
    pub fn new(
        config: ConfigManager,
        prompter: Box<dyn Prompter>,
        database: Box<dyn DatabaseClient>,
    ) -> Self {
        Self {
            config,
            prompter,
            database,
        }
    }

    /// The context for a terminal session.
    pub fn from_args(args: &Args) -> Result<Self> {
        let settings = ManagerSettings {
            owner: invoking_user(),
            ..ManagerSettings::default()
        };
        let config = ConfigManager::new(
            Box::new(YamlFileStore::new(document_path(args)?)),
            Box::new(HostFileAccess),
            settings,
        );

        Ok(Self::new(
            config,
            Box::new(TerminalPrompter),
            Box::new(MysqlCliClient::new(Box::new(ShellRunner), args.verbose)),
        ))
    }
}

fn document_path(args: &Args) -> Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => Ok(std::env::current_dir()
            .context("Failed to determine the current directory")?
            .join(DEFAULT_DOCUMENT)),
    }
}
