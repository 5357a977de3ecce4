use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indexer::{build_index, BuildConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::persist::{load_index, save_index};
use tse_core::BUILD_BUCKETS;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and check word-occurrence indexes over crawled pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a crawler page directory with a pool of worker threads
    Build {
        /// Directory of page records named 1, 2, 3, ...
        page_dir: PathBuf,
        /// Index file to write
        index_file: PathBuf,
        /// Number of worker threads
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        workers: u32,
        /// Hash table bucket count
        #[arg(long, default_value_t = BUILD_BUCKETS)]
        buckets: usize,
    },
    /// Load an index file, report its size and duplicate entries
    Check {
        index_file: PathBuf,
        /// Write the loaded index back out to this path
        #[arg(long)]
        resave: Option<PathBuf>,
        /// Hash table bucket count
        #[arg(long, default_value_t = BUILD_BUCKETS)]
        buckets: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { page_dir, index_file, workers, buckets } => {
            build(&page_dir, &index_file, workers as usize, buckets)
        }
        Commands::Check { index_file, resave, buckets } => check(&index_file, resave.as_deref(), buckets),
    }
}

fn build(page_dir: &Path, index_file: &Path, workers: usize, buckets: usize) -> Result<()> {
    fs::read_dir(page_dir).with_context(|| format!("{} is not a readable directory", page_dir.display()))?;
    let config = BuildConfig { page_dir: page_dir.to_path_buf(), workers, buckets };
    let (index, stats) = build_index(&config)?;
    save_index(&index, index_file)?;
    tracing::info!(output = %index_file.display(), documents = stats.documents, "wrote index");
    Ok(())
}

fn check(index_file: &Path, resave: Option<&Path>, buckets: usize) -> Result<()> {
    let index = load_index(index_file, buckets)?;
    println!("words: {}", index.word_count());
    println!("document pairs: {}", index.pair_count());
    let dups = index.duplicate_words();
    for word in &dups {
        println!("duplicate entry: {word}");
    }
    if let Some(out) = resave {
        save_index(&index, out)?;
    }
    if !dups.is_empty() {
        bail!("{} words have more than one entry", dups.len());
    }
    Ok(())
}
