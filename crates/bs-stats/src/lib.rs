//! Typed trip statistics for BikeStat
//!
//! Classifies the columns of a filtered trip table, summarizes each with the
//! strategy for its kind, and renders the result as a text report.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod record;
pub mod report;
pub mod session;

pub use aggregate::aggregate;
pub use classify::{StatKind, classify};
pub use error::StatsError;
pub use record::{ColumnStats, StatisticsRecord};
pub use report::Report;
pub use session::{Session, SessionConfig};

/// Result type for statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;
