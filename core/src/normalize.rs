/// Words shorter than this are never stored in an index and never constrain
/// a query clause.
pub const MIN_WORD_LEN: usize = 3;

/// Lowercase `word` if every character is an ASCII letter; reject it otherwise.
pub fn normalize(word: &str) -> Option<String> {
    if word.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(word.to_ascii_lowercase())
    } else {
        None
    }
}

/// Normalization used while indexing pages: like [`normalize`], but words
/// shorter than [`MIN_WORD_LEN`] are rejected as well.
pub fn normalize_for_index(word: &str) -> Option<String> {
    if word.len() < MIN_WORD_LEN {
        return None;
    }
    normalize(word)
}
