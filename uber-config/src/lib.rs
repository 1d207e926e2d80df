//! Configuration document model for uberstead.
//!
//! The persisted document (`uberstead.yaml`) describes the development
//! machine (`ip`, `memory`, `cpus`) and the sites served from it. This crate
//! owns the typed model of that document and the single path through which
//! it is loaded, mutated and written back:
//!
//! - [`Site`] and [`Config`] are pure in-memory values with their invariants
//!   enforced at construction and mutation time.
//! - [`DocumentStore`] reads and writes the raw document.
//! - [`ConfigManager`] owns the one `Config` of a run and persists every
//!   mutation.

pub mod config;
pub mod db_hint;
pub mod manager;
mod raw;
pub mod site;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::Config;
pub use manager::{default_document, ConfigManager, ManagerSettings};
pub use raw::RawDocument;
pub use site::{Site, SiteAttribute};
pub use store::{DocumentStore, YamlFileStore};
