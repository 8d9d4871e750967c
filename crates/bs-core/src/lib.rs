//! Trip-record tables for BikeStat
//!
//! Loads region partitions into an in-memory column store, unions them on
//! their shared columns, and filters rows by month and day of week.

pub mod data;
pub mod filter;
pub mod loader;
pub mod schema;
pub mod selector;
pub mod source;

mod error;

pub use error::BikeStatError;
pub use filter::TripFilter;
pub use selector::{Region, RegionSelection, SelectorError};
pub use source::{CsvSource, MemorySource, PartitionSource, SourceError};

/// Result type for loading and filtering
pub type Result<T> = std::result::Result<T, BikeStatError>;
