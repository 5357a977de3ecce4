use proptest::prelude::*;
use tse_core::hash::HashTable;
use tse_core::normalize::normalize;
use tse_core::persist::{parse_index, write_index};
use tse_core::queue::Queue;
use tse_core::InvertedIndex;

proptest! {
    #[test]
    fn queue_is_fifo_under_interleaving(ops in prop::collection::vec(prop::option::of(any::<u16>()), 0..64)) {
        let mut q = Queue::new();
        let mut model = std::collections::VecDeque::new();
        for op in ops {
            match op {
                Some(v) => { q.put(v); model.push_back(v); }
                None => { prop_assert_eq!(q.get(), model.pop_front()); }
            }
        }
        prop_assert_eq!(q.into_iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn table_finds_what_was_put(keys in prop::collection::vec("[a-z]{1,8}", 1..32), buckets in 1usize..64, probe in "[A-Z]{1,8}") {
        let mut t = HashTable::new(buckets);
        for k in &keys {
            t.put(k.clone(), k.as_bytes());
        }
        for k in &keys {
            prop_assert_eq!(t.find(k.as_bytes(), |e| e == k), Some(k));
        }
        prop_assert!(t.find(probe.as_bytes(), |e| *e == probe).is_none());
    }

    #[test]
    fn normalization_is_idempotent(w in "[A-Za-z]{0,12}") {
        let once = normalize(&w).unwrap();
        prop_assert_eq!(normalize(&once), Some(once.clone()));
    }

    #[test]
    fn save_then_load_keeps_triples(
        records in prop::collection::vec(("[a-z]{3,6}", 1u32..20), 0..80),
        buckets in 1usize..50,
    ) {
        let mut idx = InvertedIndex::new(buckets);
        for (w, d) in &records {
            idx.record(w, *d);
        }
        let mut out = Vec::new();
        write_index(&idx, &mut out).unwrap();
        let loaded = parse_index(std::str::from_utf8(&out).unwrap(), 7).unwrap();
        prop_assert_eq!(loaded.triples(), idx.triples());
        prop_assert!(loaded.duplicate_words().is_empty());
    }
}
