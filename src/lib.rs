//! # csv-search
//!
//! `csv-search` loads comma-separated text into an in-memory table and answers
//! value searches against it. It supports:
//!
//! - Quote-aware field splitting (commas inside `"..."` stay in the field)
//! - Optional header rows with a name → position index
//! - Memory-mapped file loading
//! - Typed row conversion through [`RowTransform`]
//! - Case-insensitive exact or whole-word matching
//! - Column restriction by header name or zero-based position
//! - Reporting which other columns hold the value when the requested one misses
//! - Cached outcomes with an LRU [`QueryCache`]
//!
//! # Example
//!
//! ```rust
//! use csv_search::{OtherColumns, SearchOutcome, Table, TableOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let csv = "State,Race,Income\nRI,White,1058.47\nRI,Black,770.26\n";
//!     let table = Table::parse_str(csv, TableOptions::with_header())?;
//!
//!     // Search one column by name
//!     let outcome = table.search("white", Some("Race"))?;
//!     assert_eq!(outcome.match_count(), 1);
//!
//!     // The value exists, just not in the requested column
//!     let outcome = table.search("white", Some("Income"))?;
//!     assert_eq!(
//!         outcome,
//!         SearchOutcome::FoundElsewhere(OtherColumns::Names(vec!["Race".into()]))
//!     );
//!
//!     // Numeric selectors are positions
//!     let outcome = table.search("RI", Some("0"))?;
//!     assert_eq!(outcome.match_count(), 2);
//!
//!     Ok(())
//! }
//! ```

mod helpers;
pub mod processor;

pub use helpers::word_match::WordMatcher;
pub use processor::{
    OtherColumns, ParseSummary, ProcessorError, RaggedRow, Row, SearchOutcome,
    column_index::ColumnIndex,
    query_builder::{QueryCache, QueryKey, SearchQuery},
    search_engine::ColumnSelector,
    star::{Star, StarTransform},
    table::{Table, TableId, TableOptions},
    transform::{Identity, RowTransform, TransformError},
};
