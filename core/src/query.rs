//! Boolean queries over an [`InvertedIndex`].
//!
//! Adjacent words are implicitly joined by AND; `or` splits the query into
//! clauses. A document scores the sum over clauses of the smallest
//! occurrence count among the clause's words.

use crate::error::QueryError;
use crate::index::{DocId, InvertedIndex};
use crate::normalize::{normalize, MIN_WORD_LEN};
use crate::page::{page_ids, PageRecord};
use crate::queue::Queue;
use anyhow::Result;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    And,
    Or,
}

impl Token {
    fn is_connector(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }

    fn as_str(&self) -> &str {
        match self {
            Token::Word(w) => w,
            Token::And => "and",
            Token::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    /// Parse one input line. `Ok(None)` means the line was blank.
    pub fn parse(line: &str) -> Result<Option<Query>, QueryError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let raw: Vec<&str> = line.split([' ', '\t']).filter(|t| !t.is_empty()).collect();
        if raw.is_empty() {
            return Ok(None);
        }

        let mut tokens = Vec::with_capacity(raw.len());
        for word in raw {
            let word = normalize(word).ok_or_else(|| QueryError::NotAlphabetic(word.to_string()))?;
            tokens.push(match word.as_str() {
                "and" => Token::And,
                "or" => Token::Or,
                _ => Token::Word(word),
            });
        }

        if tokens.first().is_some_and(Token::is_connector) {
            return Err(QueryError::LeadingConnector);
        }
        if tokens.last().is_some_and(Token::is_connector) {
            return Err(QueryError::TrailingConnector);
        }
        if let Some(pair) = tokens.windows(2).find(|w| w[0].is_connector() && w[1].is_connector()) {
            return Err(QueryError::AdjacentConnectors(pair[0].as_str().into(), pair[1].as_str().into()));
        }
        Ok(Some(Query { tokens }))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// AND-clauses: the words between `or` tokens. Explicit `and` is dropped.
    pub fn clauses(&self) -> Vec<Vec<&str>> {
        self.tokens
            .split(|t| *t == Token::Or)
            .map(|clause| {
                clause
                    .iter()
                    .filter_map(|t| match t {
                        Token::Word(w) => Some(w.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Sum over clauses of the clause minimum. Words shorter than
    /// [`MIN_WORD_LEN`] are ignored; a clause with no eligible word adds 0.
    /// Clause minimums are summed as `u64`; each may be as large as `u32::MAX`.
    pub fn score(&self, index: &InvertedIndex, doc_id: DocId) -> u64 {
        self.clauses()
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .filter(|w| w.len() >= MIN_WORD_LEN)
                    .map(|w| index.count(w, doc_id))
                    .min()
                    .map_or(0, u64::from)
            })
            .sum()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(t.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDoc {
    pub rank: u64,
    pub doc_id: DocId,
    pub url: String,
}

impl fmt::Display for RankedDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank: {} doc: {} URL: {}", self.rank, self.doc_id, self.url)
    }
}

/// Score every document in `page_dir` and return the non-zero ones by
/// descending score, ties broken by ascending document ID.
pub fn rank_documents(query: &Query, index: &InvertedIndex, page_dir: &Path) -> Result<Vec<RankedDoc>> {
    let mut candidates = Queue::new();
    let mut scanned = 0u32;
    for doc_id in page_ids(page_dir) {
        scanned += 1;
        let rank = query.score(index, doc_id);
        if rank > 0 {
            let url = PageRecord::read_url(page_dir, doc_id)?;
            candidates.put(RankedDoc { rank, doc_id, url });
        }
    }
    tracing::debug!(query = %query, scanned, matched = candidates.len(), "scored documents");
    Ok(order_by_rank(candidates))
}

/// Drain `candidates` highest rank first; among equal ranks the one queued
/// earliest comes out first.
pub fn order_by_rank(mut candidates: Queue<RankedDoc>) -> Vec<RankedDoc> {
    let mut ranked = Vec::with_capacity(candidates.len());
    loop {
        let mut max = 0;
        candidates.apply(|d| max = max.max(d.rank));
        if max == 0 {
            break;
        }
        match candidates.remove(|d| d.rank == max) {
            Some(doc) => ranked.push(doc),
            None => break,
        }
    }
    ranked
}
