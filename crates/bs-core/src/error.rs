use crate::data::DataError;
use crate::selector::SelectorError;
use crate::source::SourceError;

#[derive(thiserror::Error, Debug)]
pub enum BikeStatError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}
