use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tse_core::persist::load_index;
use tse_core::query::rank_documents;
use tse_core::{InvertedIndex, Query, QueryError, RankedDoc};

pub const INVALID_MARKER: &str = "[invalid query]";

/// Outcome of one query line.
#[derive(Debug)]
pub enum Answer {
    Blank,
    Invalid(QueryError),
    Ranked { query: Query, results: Vec<RankedDoc> },
}

/// Answers queries against one loaded index and its page directory.
pub struct Querier {
    page_dir: PathBuf,
    index: InvertedIndex,
}

impl Querier {
    pub fn new(page_dir: impl Into<PathBuf>, index: InvertedIndex) -> Self {
        Self { page_dir: page_dir.into(), index }
    }

    pub fn open(page_dir: &Path, index_file: &Path, buckets: usize) -> Result<Self> {
        let index = load_index(index_file, buckets)?;
        Ok(Self::new(page_dir, index))
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn answer(&self, line: &str) -> Result<Answer> {
        let query = match Query::parse(line) {
            Ok(Some(q)) => q,
            Ok(None) => return Ok(Answer::Blank),
            Err(e) => {
                tracing::debug!(line = line.trim_end(), error = %e, "rejected query");
                return Ok(Answer::Invalid(e));
            }
        };
        let results = rank_documents(&query, &self.index, &self.page_dir)?;
        Ok(Answer::Ranked { query, results })
    }

    /// Answer `line` and print the outcome to `out`.
    pub fn respond<W: Write>(&self, line: &str, out: &mut W) -> Result<()> {
        match self.answer(line) {
            Ok(Answer::Blank) => {}
            Ok(Answer::Invalid(_)) => writeln!(out, "{INVALID_MARKER}")?,
            Ok(Answer::Ranked { query, results }) => {
                writeln!(out, "{query}")?;
                for doc in &results {
                    writeln!(out, "{doc}")?;
                }
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "query failed");
                writeln!(out, "[error: {e:#}]")?;
            }
        }
        Ok(())
    }
}

/// Read queries from `input` until end of input, one per line.
pub fn run_repl<R: BufRead, W: Write>(querier: &Querier, mut input: R, out: &mut W, quiet: bool) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        if !quiet {
            write!(out, "> ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD, which no query word accepts.
        querier.respond(&String::from_utf8_lossy(&buf), out)?;
    }
    if !quiet {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
