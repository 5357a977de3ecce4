use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A tag is consumed whole so nothing inside markup is reported as a word.
    static ref RE: Regex = Regex::new(r"(?u)<[^>]*>|[\p{L}\p{N}]+").expect("valid regex");
}

/// Next raw word of `html` at or after byte offset `pos`.
///
/// Returns the offset to resume from together with the word. Markup between
/// `<` and `>` is skipped; a word is a maximal run of letters and digits.
pub fn next_word(html: &str, mut pos: usize) -> Option<(usize, &str)> {
    while pos <= html.len() {
        let mat = RE.find_at(html, pos)?;
        pos = mat.end();
        if !mat.as_str().starts_with('<') {
            return Some((pos, mat.as_str()));
        }
    }
    None
}

/// Iterator over the raw words of an HTML page.
pub struct Words<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (pos, word) = next_word(self.html, self.pos)?;
        self.pos = pos;
        Some(word)
    }
}

pub fn words(html: &str) -> Words<'_> {
    Words { html, pos: 0 }
}
