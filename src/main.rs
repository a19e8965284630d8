use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use sosowa::{
    info_time,
    process::{process_site, RunOptions},
    Config, HttpFetcher, Requester, Result,
};
use tracing_subscriber::EnvFilter;

/// Scrape the Sosowa listing and, optionally, the articles it lists.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file holding `main_url`
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// First listing page to scrape
    #[arg(long, default_value_t = 1)]
    first: u32,

    /// Last listing page to scrape, defaults to `first`
    #[arg(long)]
    last: Option<u32>,

    /// Fetch every listed article's content and afterword
    #[arg(long)]
    hydrate: bool,

    /// Print the records as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start_time = Local::now();

    let config = Config::from_file(&args.config)?;
    let fetcher = HttpFetcher::new(&config)?;
    let requester = Arc::new(Requester::new(config, fetcher));

    let opts = RunOptions {
        first_page: Some(args.first),
        last_page: Some(args.last.unwrap_or(args.first)),
        hydrate: args.hydrate,
    };

    // The blocking client must not be dropped inside the runtime, so main stays synchronous
    // and keeps its own handle to the requester.
    let runtime = tokio::runtime::Runtime::new()?;
    let records = runtime.block_on(process_site(requester.clone(), opts))?;
    drop(runtime);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", record.render_summary()?);
            if args.hydrate {
                println!("{}\n", record.render_content()?);
            }
        }
    }

    info_time!(start_time, "Full program time:");
    Ok(())
}
