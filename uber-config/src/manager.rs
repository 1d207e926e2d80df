//! The one path through which the configuration document is loaded,
//! mutated and persisted during a run.

// Standard library
use std::path::{Path, PathBuf};

// External crates
use serde_yaml_ng::{Mapping, Value};
use tracing::{debug, info};
use uber_core::error::{Result, UberError};
use uber_core::file_system::FileAccess;
use uber_core::prompt::Prompter;
use uber_core::validation::{parse_integer, validate_ipv4};
use uber_messages::{msg, MESSAGES};

// Internal imports
use crate::config::{Config, DEFAULT_CPUS, DEFAULT_IP, DEFAULT_MEMORY};
use crate::db_hint;
use crate::raw::RawDocument;
use crate::site::{Site, SiteAttribute};
use crate::store::DocumentStore;

pub const DEFAULT_FILE_MODE: u32 = 0o664;

/// The document used when nothing has been persisted yet.
pub fn default_document() -> RawDocument {
    let mut document = Mapping::new();
    document.insert("ip".into(), DEFAULT_IP.into());
    document.insert("memory".into(), DEFAULT_MEMORY.into());
    document.insert("cpus".into(), DEFAULT_CPUS.into());
    document.insert("authorize".into(), "~/.ssh/id_rsa.pub".into());
    document.insert(
        "keys".into(),
        Value::Sequence(vec!["~/.ssh/id_rsa".into()]),
    );
    document.insert("defaultfoldertype".into(), "nfs".into());
    document.insert("sites".into(), Value::Sequence(Vec::new()));
    document
}

/// How the manager loads and writes the document.
#[derive(Debug, Clone)]
pub struct ManagerSettings {
    /// Used when the store has no document yet.
    pub default_document: RawDocument,
    /// Applied to the document after every write.
    pub file_mode: u32,
    /// Owner applied to the document after every write; `None` skips chown.
    pub owner: Option<String>,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            default_document: default_document(),
            file_mode: DEFAULT_FILE_MODE,
            owner: None,
        }
    }
}

/// Owns the run's single [`Config`].
///
/// The config is loaded lazily on first access, from the store when a
/// document exists and from the default document otherwise, and stays loaded
/// for the rest of the run. Every mutation that must survive the run is
/// followed by a write through the store.
pub struct ConfigManager {
    store: Box<dyn DocumentStore>,
    files: Box<dyn FileAccess>,
    settings: ManagerSettings,
    config: Option<Config>,
}

impl ConfigManager {
    pub fn new(
        store: Box<dyn DocumentStore>,
        files: Box<dyn FileAccess>,
        settings: ManagerSettings,
    ) -> Self {
        Self {
            store,
            files,
            settings,
            config: None,
        }
    }

    pub fn location(&self) -> PathBuf {
        self.store.location().to_path_buf()
    }

    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// The run's config, loading it on first use. Changes go through the
    /// manager's own methods so that each one is persisted.
    pub fn config(&mut self) -> Result<&Config> {
        self.config_mut().map(|config| &*config)
    }

    pub(crate) fn config_mut(&mut self) -> Result<&mut Config> {
        let config = match self.config.take() {
            Some(config) => config,
            None => self.load()?,
        };
        Ok(self.config.insert(config))
    }

    fn load(&self) -> Result<Config> {
        if self.store.exists() {
            debug!(path = %self.store.location().display(), "loading persisted configuration");
            Config::from_raw(&self.store.read()?)
        } else {
            debug!(
                path = %self.store.location().display(),
                "no configuration document, using defaults"
            );
            Config::from_raw(&self.settings.default_document)
        }
    }

    /// Register a site and persist.
    pub fn add_site(&mut self, site: Site) -> Result<()> {
        let name = site.name().to_string();
        self.config_mut()?.add_site(site)?;
        info!(site = %name, "added site");
        self.persist()
    }

    /// Remove a site by name. Persists, and returns `true`, only when a site
    /// was actually removed.
    pub fn delete_site_by_name(&mut self, name: &str) -> Result<bool> {
        if self.config_mut()?.delete_site_by_name(name).is_none() {
            debug!(site = name, "no site to delete");
            return Ok(false);
        }
        info!(site = name, "deleted site");
        self.persist()?;
        Ok(true)
    }

    /// Collect machine settings interactively when there is no document yet,
    /// or unconditionally when `skip_check` is set.
    ///
    /// Shows the configure header first whenever the questions will be asked.
    /// Returns `true` when the document was (re)written, `false` when a
    /// document already existed and `skip_check` was not set. Declining the
    /// confirmation is a fatal precondition failure.
    pub fn update_config(&mut self, prompter: &dyn Prompter, skip_check: bool) -> Result<bool> {
        if !skip_check && self.store.exists() {
            return Ok(false);
        }

        prompter.heading(MESSAGES.config.configure_header);

        let question = if skip_check {
            MESSAGES.config.confirm_update.to_string()
        } else {
            msg!(
                MESSAGES.config.confirm_generate,
                path = self.store.location().display().to_string()
            )
        };
        if !prompter.confirm(&question, true)? {
            return Err(UberError::FatalPrecondition(
                MESSAGES.config.aborting.to_string(),
            ));
        }

        let config = self.config()?;
        let current_ip = config.ip().to_string();
        let current_memory = config.memory().to_string();
        let current_cpus = config.cpus().to_string();

        let ip = prompter.ask(
            MESSAGES.config.ask_ip,
            Some(&current_ip),
            Some(&validate_ipv4),
        )?;
        let memory = prompter.ask(
            MESSAGES.config.ask_memory,
            Some(&current_memory),
            Some(&validate_memory),
        )?;
        let cpus = prompter.ask(
            MESSAGES.config.ask_cpus,
            Some(&current_cpus),
            Some(&validate_cpus),
        )?;

        let config = self.config_mut()?;
        config.set_ip(ip.trim());
        config.set_memory_str(&memory)?;
        config.set_cpus_str(&cpus)?;

        self.persist()?;
        Ok(true)
    }

    /// One attribute from every site, in site order.
    pub fn get_site_attribute_list(&mut self, attribute: &str) -> Result<Vec<String>> {
        Ok(self
            .config()?
            .get_site_attribute_list(attribute)?
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// `<ip> <domain> <domain> ...` for a hosts file.
    pub fn create_row_for_hosts_file(&mut self) -> Result<String> {
        let config = self.config()?;
        let mut row = vec![config.ip()];
        row.extend(config.site_attribute_list(SiteAttribute::Domain));
        Ok(row.join(" "))
    }

    /// Rewrite the database hint lines in the site's `parameters.yml`.
    ///
    /// Returns the rewritten path, or `None` when the file does not exist.
    pub fn set_db_hint_in_parameters_yml(&self, site: &Site) -> Result<Option<PathBuf>> {
        db_hint::write_database_hint(Path::new(site.directory()), &site.database_name())
    }

    /// Write the current config, then apply the configured mode and owner.
    pub(crate) fn persist(&mut self) -> Result<()> {
        let document = self.config()?.to_raw()?;
        self.store.write(&document)?;

        let path = self.store.location();
        self.files.chmod(path, self.settings.file_mode)?;
        if let Some(owner) = &self.settings.owner {
            self.files.chown(path, owner)?;
        }

        info!(path = %path.display(), "persisted configuration");
        Ok(())
    }
}

fn validate_memory(answer: &str) -> Result<()> {
    positive_integer("memory", answer)
}

fn validate_cpus(answer: &str) -> Result<()> {
    positive_integer("cpus", answer)
}

// The model accepts any integer; the prompt insists on a usable value.
fn positive_integer(field: &str, answer: &str) -> Result<()> {
    if parse_integer(field, answer)? <= 0 {
        return Err(UberError::Validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}
