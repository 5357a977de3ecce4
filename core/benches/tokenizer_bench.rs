use criterion::{criterion_group, criterion_main, Criterion};
use tse_core::normalize::normalize_for_index;
use tse_core::tokenizer::words;
use tse_core::InvertedIndex;

fn sample_page() -> String {
    let mut html = String::from("<html><head><title>Rivers and Lakes</title></head><body>");
    for i in 0..500 {
        html.push_str(&format!("<p class=\"c{i}\">The river {i} flows into the lake, past Ocean cliffs.</p>"));
    }
    html.push_str("</body></html>");
    html
}

fn bench_words(c: &mut Criterion) {
    let html = sample_page();
    c.bench_function("words_and_normalize", |b| {
        b.iter(|| words(&html).filter_map(normalize_for_index).count())
    });
}

fn bench_record(c: &mut Criterion) {
    let html = sample_page();
    let normalized: Vec<String> = words(&html).filter_map(normalize_for_index).collect();
    c.bench_function("index_record_page", |b| {
        b.iter(|| {
            let mut idx = InvertedIndex::new(10_000);
            for w in &normalized {
                idx.record(w, 1);
            }
            idx.word_count()
        })
    });
}

criterion_group!(benches, bench_words, bench_record);
criterion_main!(benches);
