//! Word-occurrence index over a crawled page directory: containers, page
//! records, the on-disk index format and boolean query ranking.

pub mod error;
pub mod hash;
pub mod index;
pub mod locked;
pub mod normalize;
pub mod page;
pub mod persist;
pub mod query;
pub mod queue;
pub mod tokenizer;

pub use error::{FormatError, QueryError};
pub use index::{DocCount, DocId, InvertedIndex, WordEntry, BUILD_BUCKETS, QUERY_BUCKETS};
pub use page::PageRecord;
pub use query::{Query, RankedDoc};
