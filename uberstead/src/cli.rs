// CLI argument parsing and definitions

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "uberstead")]
#[command(about = "Provision a local development machine and register the sites it serves")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration document (default: ./uberstead.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Stream external command output instead of showing a progress bar
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Set the machine's IP, memory and CPU count
    Configure,
    /// Manage registered sites
    Sites {
        #[command(subcommand)]
        command: SitesSubcommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SitesSubcommand {
    /// Register a new site, prompting for anything not given as a flag
    Add(SiteAddArgs),
    /// Remove a site by name
    Delete {
        /// Name of the site to remove
        name: String,
    },
    /// List registered sites
    List {
        /// Print only this attribute (name, domain, directory or webroot), one per line
        #[arg(short, long)]
        attribute: Option<String>,
    },
    /// Print the machine IP followed by every site domain, for /etc/hosts
    HostsRow,
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct SiteAddArgs {
    /// Site name
    #[arg(long)]
    pub name: Option<String>,

    /// Domain served by the site (e.g. www.example.dev)
    #[arg(long)]
    pub domain: Option<String>,

    /// Project directory on this machine
    #[arg(long)]
    pub directory: Option<String>,

    /// Webroot inside the project directory
    #[arg(long)]
    pub webroot: Option<String>,

    /// Skip creating the site's database
    #[arg(long)]
    pub no_database: bool,
}
