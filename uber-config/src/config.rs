// Standard library
use std::collections::HashSet;

// External crates
use indexmap::IndexMap;
use serde_yaml_ng::Value;
use tracing::debug;
use uber_core::error::{Result, UberError};
use uber_core::validation::parse_integer;

// Internal imports
use crate::raw::{ConfigDoc, RawDocument, SiteDoc};
use crate::site::{Site, SiteAttribute};

pub const DEFAULT_IP: &str = "192.168.10.10";
pub const DEFAULT_MEMORY: i64 = 2048;
pub const DEFAULT_CPUS: i64 = 1;

/// In-memory model of the configuration document.
///
/// Holds the machine settings and the ordered list of sites. Site names are
/// unique; every constructor and mutator keeps it that way. Top-level keys
/// the model does not interpret (`authorize`, `keys`, `folders`, ...) are
/// carried through untouched, whatever the type of their key, so rewriting
/// the document never drops or retypes them.
///
/// `Config` never reads or writes storage; see
/// [`ConfigManager`](crate::manager::ConfigManager) for that.
///
/// # Examples
/// ```
/// use uber_config::{Config, Site};
///
/// let mut config = Config::default();
/// config.add_site(Site::new("blog", "blog.dev", "/srv/blog", None)?)?;
/// assert_eq!(config.site_names(), vec!["blog"]);
///
/// let copy = Config::from_raw(&config.to_raw()?)?;
/// assert_eq!(copy, config);
/// # Ok::<(), uber_core::error::UberError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    ip: String,
    memory: i64,
    cpus: i64,
    sites: Vec<Site>,
    extra: IndexMap<Value, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: DEFAULT_IP.to_string(),
            memory: DEFAULT_MEMORY,
            cpus: DEFAULT_CPUS,
            sites: Vec::new(),
            extra: IndexMap::new(),
        }
    }
}

impl Config {
    /// Build a `Config` from a raw document.
    ///
    /// Missing or null `ip`/`memory`/`cpus` take their defaults, a missing or
    /// null `sites` becomes an empty list. Fails if any site entry is invalid
    /// or two entries share a name; nothing is built in that case.
    pub fn from_raw(raw: &RawDocument) -> Result<Self> {
        let doc = ConfigDoc::from_document(raw)?;

        let config = Config {
            ip: doc.ip.unwrap_or_else(|| DEFAULT_IP.to_string()),
            memory: doc.memory.unwrap_or(DEFAULT_MEMORY),
            cpus: doc.cpus.unwrap_or(DEFAULT_CPUS),
            sites: sites_from_docs(doc.sites.unwrap_or_default())?,
            extra: doc.extra,
        };

        debug!(
            ip = %config.ip,
            sites = config.sites.len(),
            "built configuration from raw document"
        );
        Ok(config)
    }

    /// Serialize back to a raw document: `ip`, `memory`, `cpus`, any
    /// passthrough keys in their original order, then `sites`.
    pub fn to_raw(&self) -> Result<RawDocument> {
        ConfigDoc {
            ip: Some(self.ip.clone()),
            memory: Some(self.memory),
            cpus: Some(self.cpus),
            extra: self.extra.clone(),
            sites: Some(self.sites.iter().map(Site::to_doc).collect()),
        }
        .into_document()
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn set_ip(&mut self, ip: impl Into<String>) {
        self.ip = ip.into();
    }

    /// Memory in megabytes.
    pub fn memory(&self) -> i64 {
        self.memory
    }

    pub fn set_memory(&mut self, memory: i64) {
        self.memory = memory;
    }

    pub fn set_memory_str(&mut self, memory: &str) -> Result<()> {
        self.memory = parse_integer("memory", memory)?;
        Ok(())
    }

    pub fn cpus(&self) -> i64 {
        self.cpus
    }

    pub fn set_cpus(&mut self, cpus: i64) {
        self.cpus = cpus;
    }

    pub fn set_cpus_str(&mut self, cpus: &str) -> Result<()> {
        self.cpus = parse_integer("cpus", cpus)?;
        Ok(())
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.name() == name)
    }

    pub fn contains_site(&self, name: &str) -> bool {
        self.site(name).is_some()
    }

    /// Passthrough keys, in document order.
    pub fn extra(&self) -> &IndexMap<Value, Value> {
        &self.extra
    }

    /// Append a site. Fails without modifying anything if the name is taken.
    pub fn add_site(&mut self, site: Site) -> Result<()> {
        if self.contains_site(site.name()) {
            return Err(UberError::DuplicateName(site.name().to_string()));
        }
        self.sites.push(site);
        Ok(())
    }

    /// Remove the site with this name, returning it. Unknown names are not an
    /// error.
    pub fn delete_site_by_name(&mut self, name: &str) -> Option<Site> {
        let index = self.sites.iter().position(|site| site.name() == name)?;
        Some(self.sites.remove(index))
    }

    /// One attribute from every site, in site order.
    pub fn site_attribute_list(&self, attribute: SiteAttribute) -> Vec<&str> {
        self.sites
            .iter()
            .map(|site| site.attribute(attribute))
            .collect()
    }

    /// Like [`site_attribute_list`](Self::site_attribute_list) with the
    /// attribute named by a string.
    pub fn get_site_attribute_list(&self, attribute: &str) -> Result<Vec<&str>> {
        Ok(self.site_attribute_list(attribute.parse()?))
    }

    pub fn site_names(&self) -> Vec<&str> {
        self.site_attribute_list(SiteAttribute::Name)
    }
}

fn sites_from_docs(docs: Vec<SiteDoc>) -> Result<Vec<Site>> {
    let mut seen = HashSet::new();
    let mut sites = Vec::with_capacity(docs.len());
    for (index, doc) in docs.into_iter().enumerate() {
        let site = Site::from_doc(doc).map_err(|e| match e {
            UberError::Validation(message) => {
                UberError::Validation(format!("sites[{}]: {}", index, message))
            }
            other => other,
        })?;
        if !seen.insert(site.name().to_string()) {
            return Err(UberError::DuplicateName(site.name().to_string()));
        }
        sites.push(site);
    }
    Ok(sites)
}
