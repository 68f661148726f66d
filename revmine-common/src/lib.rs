//! Common utilities and types for the RevMine review-mining dashboard

pub mod error;
pub mod logging;
pub mod records;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, RevMineError};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use records::{DailyStatistic, Review, TagKind, TagOccurrence};
pub use types::*;
