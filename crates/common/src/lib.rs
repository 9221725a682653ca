//! staffsearch shared building blocks
//!
//! Configuration, error type and logging setup used by every crate.

pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::StaffSearchError;
pub type Result<T> = std::result::Result<T, StaffSearchError>;
