//! Page records written by the crawler, one file per document.
//!
//! ```text
//! <url>\n
//! <depth>\n
//! <html length>\n
//! <exactly html-length bytes of html>
//! ```
//!
//! Files are named by document ID, and IDs are dense starting at 1: the
//! first missing ID marks the end of the corpus.

use crate::DocId;
use anyhow::{anyhow, bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub depth: u32,
    pub html: Vec<u8>,
}

pub fn page_path(dir: &Path, id: DocId) -> PathBuf {
    dir.join(id.to_string())
}

impl PageRecord {
    pub fn new(url: impl Into<String>, depth: u32, html: impl Into<Vec<u8>>) -> Self {
        Self { url: url.into(), depth, html: html.into() }
    }

    pub fn exists(dir: &Path, id: DocId) -> bool {
        page_path(dir, id).is_file()
    }

    /// Load record `id`, or `None` when the directory has no such file.
    pub fn load(dir: &Path, id: DocId) -> Result<Option<Self>> {
        let path = page_path(dir, id);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("opening page {}", path.display())),
        };
        let mut reader = BufReader::new(file);
        let url = read_line(&mut reader, id, "url")?;
        let depth = read_line(&mut reader, id, "depth")?
            .parse()
            .with_context(|| format!("page {id}: bad depth"))?;
        let len: u64 = read_line(&mut reader, id, "html length")?
            .parse()
            .with_context(|| format!("page {id}: bad html length"))?;
        // The declared length is untrusted; only what the file holds is buffered.
        let mut html = Vec::new();
        reader
            .by_ref()
            .take(len)
            .read_to_end(&mut html)
            .with_context(|| format!("page {id}: reading html"))?;
        if html.len() as u64 != len {
            bail!("page {id}: html shorter than declared {len} bytes");
        }
        Ok(Some(Self { url, depth, html }))
    }

    /// Read only the URL line of record `id`.
    pub fn read_url(dir: &Path, id: DocId) -> Result<String> {
        let path = page_path(dir, id);
        let file = File::open(&path).with_context(|| format!("opening page {}", path.display()))?;
        read_line(&mut BufReader::new(file), id, "url")
    }

    pub fn save(&self, dir: &Path, id: DocId) -> Result<()> {
        fs::create_dir_all(dir)?;
        let path = page_path(dir, id);
        let mut f = File::create(&path).with_context(|| format!("creating page {}", path.display()))?;
        write!(f, "{}\n{}\n{}\n", self.url, self.depth, self.html.len())?;
        f.write_all(&self.html)?;
        Ok(())
    }

    pub fn html_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.html)
    }
}

fn read_line<R: BufRead>(reader: &mut R, id: DocId, field: &str) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("page {id}: missing {field} line");
    }
    let line = line
        .strip_suffix('\n')
        .ok_or_else(|| anyhow!("page {id}: unterminated {field} line"))?;
    Ok(line.trim_end_matches('\r').to_string())
}

/// Document IDs present in `dir`: 1, 2, ... up to the first gap.
pub fn page_ids(dir: &Path) -> impl Iterator<Item = DocId> + '_ {
    (1..).take_while(move |&id| PageRecord::exists(dir, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let page = PageRecord::new("http://example.com/", 2, "<p>line one\nline two</p>");
        page.save(dir.path(), 1).unwrap();
        assert_eq!(PageRecord::load(dir.path(), 1).unwrap(), Some(page));
        assert_eq!(PageRecord::read_url(dir.path(), 1).unwrap(), "http://example.com/");
    }

    #[test]
    fn missing_record_is_none() {
        let dir = tempdir().unwrap();
        assert!(PageRecord::load(dir.path(), 1).unwrap().is_none());
        assert!(!PageRecord::exists(dir.path(), 1));
    }

    #[test]
    fn truncated_html_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1"), "http://x/\n0\n50\n<p>short</p>").unwrap();
        assert!(PageRecord::load(dir.path(), 1).is_err());
    }

    #[test]
    fn huge_declared_length_is_an_error_naming_the_page() {
        let dir = tempdir().unwrap();
        for len in ["18446744073709551000", "1099511627776"] {
            fs::write(dir.path().join("3"), format!("http://x/\n0\n{len}\n<p>tiny</p>")).unwrap();
            let err = PageRecord::load(dir.path(), 3).unwrap_err();
            assert!(err.to_string().contains("page 3"), "{err:#}");
        }
    }

    #[test]
    fn reads_exactly_declared_length() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1"), "http://x/\n0\n5\nhellotrailing").unwrap();
        let page = PageRecord::load(dir.path(), 1).unwrap().unwrap();
        assert_eq!(page.html, b"hello");
    }

    #[test]
    fn ids_stop_at_first_gap() {
        let dir = tempdir().unwrap();
        for id in [1, 2, 4] {
            PageRecord::new("u", 0, "x").save(dir.path(), id).unwrap();
        }
        assert_eq!(page_ids(dir.path()).collect::<Vec<_>>(), vec![1, 2]);
    }
}
