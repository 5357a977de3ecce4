use anyhow::{Context, Result};
use clap::Parser;
use querier::{run_repl, Querier};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::QUERY_BUCKETS;

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Rank crawled pages against boolean queries read from stdin", long_about = None)]
struct Args {
    /// Directory of page records named 1, 2, 3, ...
    page_dir: PathBuf,
    /// Index file written by the indexer
    index_file: PathBuf,
    /// Do not print the "> " prompt
    #[arg(short, long)]
    quiet: bool,
    /// Hash table bucket count
    #[arg(long, default_value_t = QUERY_BUCKETS)]
    buckets: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    fs::read_dir(&args.page_dir).with_context(|| format!("{} is not a readable directory", args.page_dir.display()))?;
    File::open(&args.index_file).with_context(|| format!("{} is not readable", args.index_file.display()))?;

    let querier = Querier::open(&args.page_dir, &args.index_file, args.buckets)?;
    tracing::info!(words = querier.index().word_count(), "querier ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run_repl(&querier, stdin.lock(), &mut stdout, args.quiet)
}
