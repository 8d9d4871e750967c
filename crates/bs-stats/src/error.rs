//! Statistics-related error types

use thiserror::Error;

use bs_core::BikeStatError;
use bs_core::data::DataError;

/// Statistics-related errors
#[derive(Debug, Error)]
pub enum StatsError {
    /// A column has no non-missing values to summarize
    #[error("Column '{0}' has no values to summarize")]
    EmptyColumn(String),

    /// Loading, selector or source error
    #[error(transparent)]
    Core(#[from] BikeStatError),

    /// Data-related error
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}
