//! # Wave Watch Application Entry Point
//!
//! Builds the "best wave of the last three days" report once, then serves it
//! over HTTP until the process is stopped.
//!
//! ```text
//! wave-watch                              # default feed, today
//! wave-watch file:///tmp/waves.csv 2024-06-16
//! ```


use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_watch_lib::{config::Config, pipeline::create_page, server, source::DefaultFetcher};

const USAGE: &str = "usage: wave-watch [LOCATOR DATE]";

/// What a run should report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub locator: String,
    pub today: NaiveDate,
}

/// Interpret positional arguments (program name already removed).
///
/// Both `LOCATOR` and `DATE` must be given to override anything; zero or one
/// argument falls back to the configured locator and `today`. More than two
/// arguments is a usage error.
pub fn resolve_args(
    args: &[String],
    config: &Config,
    today: NaiveDate,
) -> anyhow::Result<RunTarget> {
    match args {
        [locator, date] => {
            let today = date
                .parse::<NaiveDate>()
                .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD\n{}", date, USAGE))?;
            Ok(RunTarget {
                locator: locator.clone(),
                today,
            })
        }
        [] | [_] => Ok(RunTarget {
            locator: config.feed.locator.clone(),
            today,
        }),
        _ => bail!("expected 0 or 2 arguments, got {}\n{}", args.len(), USAGE),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load();
    let args: Vec<String> = env::args().skip(1).collect();
    let target = resolve_args(&args, &config, Local::now().date_naive())?;
    info!("Reporting on {} for {}", target.locator, target.today);

    // The blocking HTTP client must run before the async runtime exists
    let document = create_page(&DefaultFetcher::new(), &target.locator, target.today, &config)
        .with_context(|| format!("could not build report from {}", target.locator))?;
    info!("Report ready at {}", document.path.display());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(&config.server, config.report.output_path.clone()))
        .with_context(|| {
            format!(
                "server failed on {}:{}",
                config.server.bind_address, config.server.port
            )
        })
}
