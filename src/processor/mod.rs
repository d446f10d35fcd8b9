use std::fmt;
use thiserror::Error;

pub mod column_index;
pub mod query_builder;
pub mod search_engine;
pub mod star;
pub mod table;
pub mod tokenizer;
pub mod transform;

use transform::TransformError;

/// One parsed CSV record: the raw fields in source order.
pub type Row = Vec<String>;

/// Error type used across the crate
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(
        "Your CSV cannot have two columns with identical names. \"{name}\" is repeated (columns {first} and {second})"
    )]
    DuplicateHeader {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Row transform failed on line {line}: {source}")]
    RowTransform {
        line: usize,
        #[source]
        source: TransformError,
    },

    #[error(
        "You provided an invalid column to search on: {selector}. These are the available columns: {valid_columns:?}"
    )]
    InvalidSelector {
        selector: String,
        valid_columns: Vec<String>,
    },

    #[error("The csv file is empty")]
    EmptyTable,

    #[error("Value to search for was not included")]
    EmptyQuery,
}

/// Line-level report of what the loader accepted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub rows_processed: usize,
    pub ragged_rows: Vec<RaggedRow>,
}

/// A data row whose field count differs from the header's.
///
/// Ragged rows are kept in the table; this only records them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaggedRow {
    /// 1-based line number in the source
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// Columns other than the requested one that held the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherColumns {
    /// Reported when the selector was numeric or the table has no header
    Indices(Vec<usize>),
    /// Reported when the selector was a header name
    Names(Vec<String>),
}

impl fmt::Display for OtherColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtherColumns::Indices(indices) => write!(
                f,
                "Your data was not found in your requested column but it was found at the following column indexes (where the leftmost column is 0) {:?}",
                indices
            ),
            OtherColumns::Names(names) => write!(
                f,
                "Your data was not found in your requested column but it was found at the following columns {:?}",
                names
            ),
        }
    }
}

/// Result of a search that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Matching data rows in source order, with the header for display
    Found { header: Option<Row>, rows: Vec<Row> },
    /// Nothing matched anywhere
    NoMatch,
    /// The restricted column missed but other columns hit
    FoundElsewhere(OtherColumns),
}

impl SearchOutcome {
    /// Header (when present) followed by the matched rows.
    ///
    /// Empty for `NoMatch` and `FoundElsewhere`.
    pub fn display_rows(&self) -> Vec<&Row> {
        match self {
            SearchOutcome::Found { header, rows } => header.iter().chain(rows.iter()).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of matched data rows
    pub fn match_count(&self) -> usize {
        match self {
            SearchOutcome::Found { rows, .. } => rows.len(),
            _ => 0,
        }
    }
}
