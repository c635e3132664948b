use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hashfetch::config::DEFAULT_WORKER_COUNT;
use hashfetch::{report, HttpFetcher, Pool, PoolConfig};

/// Fetch URLs concurrently and print the MD5 digest of each response body.
#[derive(Parser, Debug)]
#[command(name = "hashfetch", version, about)]
struct Cli {
    /// Number of concurrent requests, 0 or less meaning the default.
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT.get() as i64, allow_negative_numbers = true)]
    parallel: i64,

    /// URLs to fetch, `http://` is assumed when no scheme is given.
    urls: Vec<String>,
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let pool = Pool::new(cli.urls, PoolConfig::new(cli.parallel));

    tracing::info!("Fetching {} url(s) with {} worker(s)", pool.task_count(), pool.workers());

    let results = pool.collect(HttpFetcher::new()).await?;

    report::write_results(io::stdout().lock(), &results)?;

    Ok(())
}
