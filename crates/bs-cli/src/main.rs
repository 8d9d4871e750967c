use std::path::PathBuf;

use anyhow::Context;
use bs_core::CsvSource;
use bs_core::selector::{NO_FILTER, normalize};
use bs_stats::{Session, SessionConfig, session::DEFAULT_PAGE_SIZE};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Summarize bikeshare trips for a city, month and weekday
#[derive(Debug, Parser)]
#[command(name = "bikestat", version, about)]
struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESTAT_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// City name or alias (c, ny, w); `n` or `all` for every city
    #[arg(long, default_value = NO_FILTER)]
    city: String,

    /// Month number (1 = January) or name; `n` for no filter
    #[arg(long, default_value = NO_FILTER)]
    month: String,

    /// Weekday number (0 = Monday) or name; `n` for no filter
    #[arg(long, default_value = NO_FILTER)]
    day: String,

    /// Print the statistics record as JSON
    #[arg(long)]
    json: bool,

    /// Print up to this many pages of raw trips after the report
    #[arg(long, value_name = "PAGES", default_value_t = 0)]
    raw: usize,

    /// Rows per raw page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SessionConfig {
        region: normalize(&args.city),
        month: normalize(&args.month),
        day: normalize(&args.day),
    };
    let source = CsvSource::new(&args.data_dir);
    let session = Session::new(config, source).context("invalid selection")?;
    info!(
        data_dir = %args.data_dir.display(),
        selection = ?session.selection(),
        filter = ?session.filter(),
        "session ready"
    );

    if args.json {
        let record = session.statistics()?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", session.report()?);
    }

    if args.raw > 0 {
        for page in session.raw_pages(args.page_size.max(1))?.take(args.raw) {
            print!("{}", page.display_rows());
            println!();
        }
    }

    Ok(())
}
