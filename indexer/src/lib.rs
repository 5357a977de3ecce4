//! Parallel index builder.
//!
//! A fixed pool of workers claims document IDs from a shared counter, loads
//! the matching page record and folds its words into one shared table. A
//! worker stops the first time it claims an ID with no page behind it, so the
//! corpus size is discovered at run time.

use anyhow::{anyhow, bail, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use tse_core::locked::{LockedHashTable, LockedQueue};
use tse_core::normalize::normalize_for_index;
use tse_core::tokenizer::words;
use tse_core::{DocCount, DocId, InvertedIndex, PageRecord, WordEntry, BUILD_BUCKETS};

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub page_dir: PathBuf,
    pub workers: usize,
    pub buckets: usize,
}

impl BuildConfig {
    pub fn new(page_dir: impl Into<PathBuf>, workers: usize) -> Self {
        Self { page_dir: page_dir.into(), workers, buckets: BUILD_BUCKETS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub documents: u32,
    pub words: usize,
    pub workers: usize,
}

/// Word entry while the build is running: several workers may append to
/// its document list at once.
struct SharedEntry {
    word: String,
    documents: LockedQueue<DocCount>,
}

impl SharedEntry {
    fn new(word: &str) -> Self {
        Self { word: word.to_string(), documents: LockedQueue::new() }
    }

    /// Only valid once every worker has joined and dropped its handles.
    fn freeze(entry: Arc<SharedEntry>) -> Result<WordEntry> {
        let e = Arc::try_unwrap(entry)
            .map_err(|shared| anyhow!("entry for {:?} is still shared after the build", shared.word))?;
        Ok(WordEntry { word: e.word, documents: e.documents.into_inner() })
    }
}

/// State handed to every worker; lives only as long as one build.
struct BuildState<'a> {
    page_dir: &'a Path,
    index: LockedHashTable<Arc<SharedEntry>>,
    next_id: AtomicU32,
}

impl BuildState<'_> {
    fn claim(&self) -> DocId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn run_worker(&self, worker: usize) -> Result<u32> {
        let mut indexed = 0;
        loop {
            let doc_id = self.claim();
            let Some(page) = PageRecord::load(self.page_dir, doc_id)? else {
                tracing::debug!(worker, doc_id, indexed, "no page, worker done");
                return Ok(indexed);
            };
            self.index_page(doc_id, &page);
            indexed += 1;
            tracing::debug!(worker, doc_id, url = %page.url, "indexed page");
        }
    }

    fn index_page(&self, doc_id: DocId, page: &PageRecord) {
        let html = page.html_text();
        for raw in words(&html) {
            let Some(word) = normalize_for_index(raw) else {
                continue;
            };
            let entry = self.index.find_or_insert_with(
                word.as_bytes(),
                |e| e.word == word,
                || Arc::new(SharedEntry::new(&word)),
            );
            entry.documents.upsert(
                |dc| dc.doc_id == doc_id,
                |dc| dc.count += 1,
                || DocCount { doc_id, count: 1 },
            );
        }
    }
}

/// Index every page in `config.page_dir` with `config.workers` threads.
pub fn build_index(config: &BuildConfig) -> Result<(InvertedIndex, BuildStats)> {
    if config.workers == 0 {
        bail!("worker count must be at least 1");
    }
    if !config.page_dir.is_dir() {
        bail!("{} is not a directory", config.page_dir.display());
    }

    let state = BuildState {
        page_dir: &config.page_dir,
        index: LockedHashTable::new(config.buckets),
        next_id: AtomicU32::new(1),
    };

    let outcomes: Vec<Result<u32>> = thread::scope(|s| {
        let handles: Vec<_> = (0..config.workers)
            .map(|worker| {
                let state = &state;
                s.spawn(move || state.run_worker(worker))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| Err(anyhow!("indexer worker panicked"))))
            .collect()
    });

    let mut documents = 0;
    for outcome in outcomes {
        documents += outcome?;
    }

    let table = state.index.into_inner().try_map(SharedEntry::freeze)?;
    let index = InvertedIndex::from_table(table);
    let stats = BuildStats { documents, words: index.word_count(), workers: config.workers };
    tracing::info!(
        documents = stats.documents,
        words = stats.words,
        workers = stats.workers,
        "index build complete"
    );
    Ok((index, stats))
}
