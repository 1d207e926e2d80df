//! Central registry for all user-facing message templates.
//!
//! Messages are grouped by domain and reached through the `MESSAGES` constant:
//!
//! ```rust
//! use uber_messages::MESSAGES;
//!
//! let header = MESSAGES.config.configure_header;
//! let added = MESSAGES.sites.add_success;
//! ```

mod common;
mod config;
mod sites;

pub use common::{CommonMessages, COMMON_MESSAGES};
pub use config::{ConfigMessages, CONFIG_MESSAGES};
pub use sites::{SiteMessages, SITE_MESSAGES};

pub struct Messages {
    pub config: ConfigMessages,
    pub sites: SiteMessages,
    pub common: CommonMessages,
}

pub const MESSAGES: Messages = Messages {
    config: CONFIG_MESSAGES,
    sites: SITE_MESSAGES,
    common: COMMON_MESSAGES,
};
