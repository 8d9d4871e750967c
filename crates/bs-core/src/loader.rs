//! Dataset loading
//!
//! Resolves a region selector to its partitions, unions them on the columns
//! they share, and relabels `birth_year` as `age_group`.

use tracing::debug;

use crate::Result;
use crate::data::DataFrame;
use crate::schema::{AGE_GROUP, BIRTH_YEAR};
use crate::selector::RegionSelection;
use crate::source::PartitionSource;

/// Load the table for a region selector string (`n`/`all`, a key or an alias)
pub fn load<S: PartitionSource + ?Sized>(source: &S, region_selector: &str) -> Result<DataFrame> {
    let selection = RegionSelection::parse(region_selector)?;
    load_selection(source, selection)
}

/// Load the table for an already resolved region selection
pub fn load_selection<S: PartitionSource + ?Sized>(
    source: &S,
    selection: RegionSelection,
) -> Result<DataFrame> {
    let regions = selection.regions();

    let partitions = regions
        .iter()
        .map(|&region| source.read_partition(region))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let df = match partitions.as_slice() {
        [single] => single.clone(),
        many => {
            let unioned = DataFrame::concat_inner(many)?;
            for (region, partition) in regions.iter().zip(many) {
                let dropped: Vec<&str> = partition
                    .column_names()
                    .into_iter()
                    .filter(|name| !unioned.has_column(name))
                    .collect();
                if !dropped.is_empty() {
                    debug!(%region, ?dropped, "columns not shared by every region");
                }
            }
            unioned
        }
    };

    let df = if df.has_column(BIRTH_YEAR) {
        df.rename(&[(BIRTH_YEAR, AGE_GROUP)])?
    } else {
        df
    };

    debug!(?regions, rows = df.nrows(), cols = df.ncols(), "loaded trips");
    Ok(df)
}
