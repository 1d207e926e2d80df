//! uber-messages
//!
//! User-facing message templates for the uberstead CLI, plus the small
//! builder used to fill `{placeholder}` variables in them.

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::MESSAGES;
