pub mod command_stream;
pub mod error;
pub mod file_system;
pub mod output_macros;
pub mod preconditions;
pub mod prompt;
pub mod validation;

pub use error::{Result, UberError};
