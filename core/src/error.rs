use thiserror::Error;

/// Why a query line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("token {0:?} is not purely alphabetic")]
    NotAlphabetic(String),
    #[error("query starts with a connector")]
    LeadingConnector,
    #[error("query ends with a connector")]
    TrailingConnector,
    #[error("connectors {0:?} and {1:?} are adjacent")]
    AdjacentConnectors(String, String),
}

/// Structural fault in an index file, with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("line {line}: not terminated by a newline")]
    Unterminated { line: usize },
    #[error("line {line}: empty token (tokens must be separated by exactly one space)")]
    EmptyToken { line: usize },
    #[error("line {line}: word {word:?} is not lowercase alphabetic")]
    BadWord { line: usize, word: String },
    #[error("line {line}: document {doc} has no count")]
    MissingCount { line: usize, doc: String },
    #[error("line {line}: {token:?} is not a positive integer")]
    BadNumber { line: usize, token: String },
}
