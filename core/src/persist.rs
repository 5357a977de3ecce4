//! Line-oriented index file.
//!
//! ```text
//! <word> <docID> <count> <docID> <count> ...\n
//! ```
//!
//! One line per word entry, in table order. Tokens are separated by exactly
//! one space and every line, including the last, ends with `\n`.

use crate::error::FormatError;
use crate::index::{DocId, InvertedIndex, WordEntry};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_index<W: Write>(index: &InvertedIndex, mut out: W) -> Result<()> {
    for entry in index.entries() {
        out.write_all(entry.word.as_bytes())?;
        for dc in entry.documents.iter() {
            write!(out, " {} {}", dc.doc_id, dc.count)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_index(index: &InvertedIndex, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("opening {} for writing", path.display()))?;
    write_index(index, BufWriter::new(f)).with_context(|| format!("writing index {}", path.display()))?;
    tracing::info!(path = %path.display(), words = index.word_count(), "saved index");
    Ok(())
}

pub fn read_index<R: BufRead>(mut input: R, bucket_count: usize) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new(bucket_count);
    let mut buf = String::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if input.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf
            .strip_suffix('\n')
            .ok_or(FormatError::Unterminated { line: line_no })?;
        index.insert_entry(parse_line(line, line_no)?);
    }
    Ok(index)
}

pub fn load_index(path: &Path, bucket_count: usize) -> Result<InvertedIndex> {
    let f = File::open(path).with_context(|| format!("opening {} for reading", path.display()))?;
    let index = read_index(BufReader::new(f), bucket_count)
        .with_context(|| format!("reading index {}", path.display()))?;
    tracing::info!(path = %path.display(), words = index.word_count(), "loaded index");
    Ok(index)
}

/// Read an index that is already entirely in memory.
pub fn parse_index(text: &str, bucket_count: usize) -> Result<InvertedIndex> {
    read_index(text.as_bytes(), bucket_count)
}

fn parse_line(line: &str, line_no: usize) -> Result<WordEntry, FormatError> {
    let mut tokens = line.split(' ');
    let word = tokens.next().unwrap_or_default();
    if word.is_empty() {
        return Err(FormatError::EmptyToken { line: line_no });
    }
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(FormatError::BadWord { line: line_no, word: word.to_string() });
    }
    let mut entry = WordEntry::new(word);
    while let Some(doc) = tokens.next() {
        let doc_id: DocId = parse_positive(doc, line_no)?;
        let count = match tokens.next() {
            Some(count) => parse_positive(count, line_no)?,
            None => return Err(FormatError::MissingCount { line: line_no, doc: doc.to_string() }),
        };
        entry.set(doc_id, count);
    }
    tracing::trace!(line = line_no, word = %entry.word, docs = entry.documents.len(), "parsed index line");
    Ok(entry)
}

fn parse_positive(token: &str, line_no: usize) -> Result<u32, FormatError> {
    if token.is_empty() {
        return Err(FormatError::EmptyToken { line: line_no });
    }
    match token.parse::<u32>() {
        Ok(n) if n > 0 && token.bytes().all(|b| b.is_ascii_digit()) => Ok(n),
        _ => Err(FormatError::BadNumber { line: line_no, token: token.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> InvertedIndex {
        let mut idx = InvertedIndex::new(8);
        for (w, d) in [("ocean", 1), ("ocean", 1), ("ocean", 2), ("river", 2)] {
            idx.record(w, d);
        }
        idx
    }

    fn err_of(text: &str) -> FormatError {
        parse_index(text, 8).unwrap_err().downcast::<FormatError>().unwrap()
    }

    #[test]
    fn writes_one_line_per_word() {
        let mut out = Vec::new();
        write_index(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["ocean 1 2 2 1", "river 2 1"]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.dat");
        let idx = sample();
        save_index(&idx, &path).unwrap();
        let loaded = load_index(&path, 3).unwrap();
        assert_eq!(loaded.triples(), idx.triples());
    }

    #[test]
    fn empty_file_is_empty_index() {
        assert!(parse_index("", 8).unwrap().is_empty());
    }

    #[test]
    fn word_without_documents_is_allowed() {
        let idx = parse_index("lonely\n", 8).unwrap();
        assert!(idx.get("lonely").unwrap().documents.is_empty());
    }

    #[test]
    fn malformed_spacing_is_rejected() {
        assert_eq!(err_of("cat  1 2\n"), FormatError::EmptyToken { line: 1 });
        assert_eq!(err_of("cat 1 2 \n"), FormatError::EmptyToken { line: 1 });
        assert_eq!(err_of(" cat 1 2\n"), FormatError::EmptyToken { line: 1 });
        assert!(matches!(err_of("cat\t1 2\n"), FormatError::BadWord { .. }));
    }

    #[test]
    fn bad_pairs_are_rejected() {
        assert!(matches!(err_of("cat 1\n"), FormatError::MissingCount { line: 1, .. }));
        assert!(matches!(err_of("ok 1 1\ncat x 2\n"), FormatError::BadNumber { line: 2, .. }));
        assert!(matches!(err_of("cat 0 2\n"), FormatError::BadNumber { .. }));
        assert!(matches!(err_of("cat 1 +2\n"), FormatError::BadNumber { .. }));
    }

    #[test]
    fn missing_final_newline_is_rejected() {
        assert_eq!(err_of("cat 1 2\ndog 1 1"), FormatError::Unterminated { line: 2 });
    }

    #[test]
    fn duplicate_lines_stay_separate_entries() {
        let idx = parse_index("cat 1 2\ncat 3 1\n", 8).unwrap();
        assert_eq!(idx.duplicate_words(), vec!["cat".to_string()]);
        assert_eq!(idx.count("cat", 1), 2);
    }

    #[test]
    fn save_into_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("index.dat");
        let err = save_index(&sample(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("for writing"), "{err:#}");
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_index(&dir.path().join("nope"), 8).is_err());
    }
}
