use crate::hash::HashTable;
use crate::queue::Queue;
use std::collections::{BTreeSet, HashMap};

pub type DocId = u32;

/// Bucket count used when building an index from pages.
pub const BUILD_BUCKETS: usize = 10_000;
/// Bucket count used when loading an index for querying.
pub const QUERY_BUCKETS: usize = 1_000;

/// Occurrences of one word in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocCount {
    pub doc_id: DocId,
    pub count: u32,
}

/// One normalized word and the documents containing it, in first-seen order.
#[derive(Debug, Clone)]
pub struct WordEntry {
    pub word: String,
    pub documents: Queue<DocCount>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into(), documents: Queue::new() }
    }

    pub fn count_in(&self, doc_id: DocId) -> u32 {
        self.documents.find(|dc| dc.doc_id == doc_id).map_or(0, |dc| dc.count)
    }

    /// Add `n` occurrences in `doc_id`, creating the document's counter if needed.
    pub fn add(&mut self, doc_id: DocId, n: u32) {
        match self.documents.find_mut(|dc| dc.doc_id == doc_id) {
            Some(dc) => dc.count += n,
            None => self.documents.put(DocCount { doc_id, count: n }),
        }
    }

    pub fn set(&mut self, doc_id: DocId, count: u32) {
        match self.documents.find_mut(|dc| dc.doc_id == doc_id) {
            Some(dc) => dc.count = count,
            None => self.documents.put(DocCount { doc_id, count }),
        }
    }
}

/// Word-occurrence index: a hash table of [`WordEntry`] keyed by word.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    table: HashTable<WordEntry>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new(BUILD_BUCKETS)
    }
}

impl InvertedIndex {
    pub fn new(bucket_count: usize) -> Self {
        Self { table: HashTable::new(bucket_count) }
    }

    pub fn from_table(table: HashTable<WordEntry>) -> Self {
        Self { table }
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Earliest entry for `word`.
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.table.find(word.as_bytes(), |e| e.word == word)
    }

    /// Occurrences of `word` in `doc_id`; 0 when either is absent.
    pub fn count(&self, word: &str, doc_id: DocId) -> u32 {
        self.get(word).map_or(0, |e| e.count_in(doc_id))
    }

    /// Count one occurrence of an already-normalized word.
    pub fn record(&mut self, word: &str, doc_id: DocId) {
        if self.get(word).is_none() {
            self.insert_entry(WordEntry::new(word));
        }
        if let Some(entry) = self.table.find_mut(word.as_bytes(), |e| e.word == word) {
            entry.add(doc_id, 1);
        }
    }

    /// Insert `entry` without checking for an existing entry with that word.
    pub fn insert_entry(&mut self, entry: WordEntry) {
        let key = entry.word.clone();
        self.table.put(entry, key.as_bytes());
    }

    /// Entries in table order: bucket ascending, then insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &WordEntry> {
        self.table.iter()
    }

    pub fn word_count(&self) -> usize {
        self.table.len()
    }

    pub fn pair_count(&self) -> usize {
        self.entries().map(|e| e.documents.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every (word, document, count) triple, order-independent.
    pub fn triples(&self) -> BTreeSet<(String, DocId, u32)> {
        self.entries()
            .flat_map(|e| e.documents.iter().map(move |dc| (e.word.clone(), dc.doc_id, dc.count)))
            .collect()
    }

    /// Words that have more than one entry, sorted.
    pub fn duplicate_words(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for e in self.entries() {
            *seen.entry(e.word.as_str()).or_insert(0) += 1;
        }
        let mut dups: Vec<String> = seen.into_iter().filter(|(_, n)| *n > 1).map(|(w, _)| w.to_string()).collect();
        dups.sort();
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_creates_then_increments() {
        let mut idx = InvertedIndex::new(16);
        idx.record("ocean", 1);
        idx.record("ocean", 1);
        idx.record("ocean", 2);
        assert_eq!(idx.count("ocean", 1), 2);
        assert_eq!(idx.count("ocean", 2), 1);
        assert_eq!(idx.count("ocean", 3), 0);
        assert_eq!(idx.count("river", 1), 0);
        assert_eq!(idx.word_count(), 1);
        assert_eq!(idx.pair_count(), 2);
    }

    #[test]
    fn documents_keep_first_seen_order() {
        let mut idx = InvertedIndex::new(4);
        for doc in [3, 1, 2, 1] {
            idx.record("cat", doc);
        }
        let docs: Vec<DocId> = idx.get("cat").unwrap().documents.iter().map(|dc| dc.doc_id).collect();
        assert_eq!(docs, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_entries_are_reported() {
        let mut idx = InvertedIndex::new(4);
        idx.insert_entry(WordEntry::new("cat"));
        idx.insert_entry(WordEntry::new("cat"));
        idx.insert_entry(WordEntry::new("dog"));
        assert_eq!(idx.duplicate_words(), vec!["cat".to_string()]);
    }

    #[test]
    fn set_overwrites_count() {
        let mut e = WordEntry::new("cat");
        e.set(4, 2);
        e.set(4, 9);
        assert_eq!(e.count_in(4), 9);
        assert_eq!(e.documents.len(), 1);
    }
}
