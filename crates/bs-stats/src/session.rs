//! Report sessions
//!
//! A session captures the three selectors once and answers every request by
//! reloading and refiltering the source; nothing is cached between calls.

use bs_core::data::DataFrame;
use bs_core::selector::NO_FILTER;
use bs_core::{BikeStatError, PartitionSource, RegionSelection, TripFilter, loader};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;
use crate::aggregate::aggregate;
use crate::record::StatisticsRecord;
use crate::report::Report;

/// Rows per raw-data page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Selector strings for a session, already normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Region key, alias, or `n` for every region
    pub region: String,
    /// Month number (1 = January), month name, or `n`
    pub month: String,
    /// Weekday number (0 = Monday), weekday name, or `n`
    pub day: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            region: NO_FILTER.to_string(),
            month: NO_FILTER.to_string(),
            day: NO_FILTER.to_string(),
        }
    }
}

/// Resolved selectors bound to a partition source
#[derive(Debug)]
pub struct Session<S> {
    config: SessionConfig,
    selection: RegionSelection,
    filter: TripFilter,
    source: S,
}

impl<S: PartitionSource> Session<S> {
    /// Resolve the selectors; invalid selectors fail here
    pub fn new(config: SessionConfig, source: S) -> Result<Self> {
        let selection = RegionSelection::parse(&config.region).map_err(BikeStatError::from)?;
        let filter = TripFilter::parse(&config.month, &config.day)?;

        Ok(Self {
            config,
            selection,
            filter,
            source,
        })
    }

    /// Regions the session reads
    pub fn selection(&self) -> RegionSelection {
        self.selection
    }

    /// Month and day predicates of the session
    pub fn filter(&self) -> TripFilter {
        self.filter
    }

    /// Load and filter a fresh copy of the session's table
    pub fn table(&self) -> Result<DataFrame> {
        let df = loader::load_selection(&self.source, self.selection)?;
        Ok(self.filter.apply(&df)?)
    }

    /// Statistics of the session's table
    pub fn statistics(&self) -> Result<StatisticsRecord> {
        let df = self.table()?;
        info!(
            region = %self.config.region,
            month = %self.config.month,
            day = %self.config.day,
            rows = df.nrows(),
            "computing statistics"
        );
        aggregate(&df)
    }

    /// Printable report of the session's statistics
    pub fn report(&self) -> Result<Report> {
        Ok(Report::new(
            self.statistics()?,
            self.filter,
            self.selection.has_demographics(),
        ))
    }

    /// The session's raw rows, in pages of `page_size`
    pub fn raw_pages(&self, page_size: usize) -> Result<std::vec::IntoIter<DataFrame>> {
        let df = self.table()?;
        Ok(df.pages(page_size).collect::<Vec<_>>().into_iter())
    }
}
