use tse_core::normalize::normalize_for_index;
use tse_core::tokenizer::words;

fn indexable(html: &str) -> Vec<String> {
    words(html).filter_map(normalize_for_index).collect()
}

#[test]
fn it_lowercases_and_drops_markup() {
    let w = indexable("<title>The OCEAN</title><body>Ocean waves</body>");
    assert_eq!(w, vec!["the", "ocean", "ocean", "waves"]);
}

#[test]
fn it_discards_short_and_non_alphabetic_words() {
    let w = indexable("An ox ate 42 apples in café2 x-ray");
    assert_eq!(w, vec!["ate", "apples", "ray"]);
}

#[test]
fn attributes_inside_tags_are_not_words() {
    let w = indexable("<a href=\"http://example.com/rivers\" class=\"lakes\">link</a>");
    assert_eq!(w, vec!["link"]);
}
