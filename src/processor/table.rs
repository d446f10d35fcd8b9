use memmap2::Mmap;
use std::{
    fs::File,
    io::{self, BufRead},
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};
use tracing::{debug, info, instrument};

use crate::processor::{
    ParseSummary, ProcessorError, RaggedRow, Row,
    column_index::ColumnIndex,
    tokenizer::{is_blank, split_line},
    transform::{Identity, RowTransform},
};

/// Load-time configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Treat the first non-blank line as column names
    pub has_header: bool,
}

impl TableOptions {
    pub fn with_header() -> Self {
        TableOptions { has_header: true }
    }

    pub fn without_header() -> Self {
        TableOptions { has_header: false }
    }
}

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one load; clones of a table share it
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// In-memory CSV table
///
/// Built once by one of the loaders and read-only afterwards. `T` is the
/// application row type produced by a [`RowTransform`]; searching needs the
/// raw [`Row`]s of the default identity transform.
///
/// # Examples
///
/// ```rust
/// # use csv_search::{Table, TableOptions};
/// let table = Table::parse_str("State,Race\nRI,White\n", TableOptions::with_header()).unwrap();
/// assert_eq!(table.row_count(), 1);
/// assert_eq!(table.columns().position("Race"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Table<T = Row> {
    id: TableId,
    has_header: bool,
    header: Option<Row>,
    columns: ColumnIndex,
    rows: Vec<T>,
    field_count: usize,
    summary: ParseSummary,
}

impl Table<Row> {
    /// Parses a CSV stream into raw string rows
    ///
    /// # Errors
    /// Returns a [`ProcessorError`] if:
    /// - reading the stream fails
    /// - the header repeats a column name
    pub fn parse<R: BufRead>(reader: R, options: TableOptions) -> Result<Self, ProcessorError> {
        Self::parse_with(reader, options, &Identity)
    }

    pub fn parse_str(text: &str, options: TableOptions) -> Result<Self, ProcessorError> {
        Self::parse(text.as_bytes(), options)
    }

    /// Loads a CSV file through a read-only memory map
    ///
    /// # Example
    /// ```rust,no_run
    /// # use csv_search::{Table, TableOptions};
    /// let table = Table::load_csv("data/income_by_race.csv".as_ref(), TableOptions::with_header()).unwrap();
    /// ```
    pub fn load_csv(path: &Path, options: TableOptions) -> Result<Self, ProcessorError> {
        Self::load_csv_with(path, options, &Identity)
    }
}

impl<T> Table<T> {
    /// Parses a CSV stream, converting each data row with `transform`
    ///
    /// Each physical line is one record and blank lines are skipped. Rows
    /// whose field count differs from the header (or, without a header, from
    /// the first row) are kept and listed in [`Table::summary`].
    ///
    /// # Errors
    /// Returns a [`ProcessorError`] if:
    /// - reading the stream fails
    /// - the header repeats a column name
    /// - `transform` rejects a row; the whole load is aborted
    #[instrument(level = "debug", skip_all, fields(has_header = options.has_header))]
    pub fn parse_with<R, F>(
        reader: R,
        options: TableOptions,
        transform: &F,
    ) -> Result<Self, ProcessorError>
    where
        R: BufRead,
        F: RowTransform<Output = T>,
    {
        let mut header: Option<Row> = None;
        let mut columns = ColumnIndex::default();
        let mut rows = Vec::new();
        let mut field_count: Option<usize> = None;
        let mut summary = ParseSummary::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if is_blank(&line) {
                continue;
            }

            let fields = split_line(&line);

            if options.has_header && header.is_none() {
                columns = ColumnIndex::from_header(&fields)?;
                field_count = Some(fields.len());
                header = Some(fields);
                continue;
            }

            let expected = *field_count.get_or_insert(fields.len());
            if fields.len() != expected {
                debug!(
                    line = line_no,
                    expected,
                    found = fields.len(),
                    "ragged row accepted"
                );
                summary.ragged_rows.push(RaggedRow {
                    line: line_no,
                    expected,
                    found: fields.len(),
                });
            }

            let record = transform
                .create(fields)
                .map_err(|source| ProcessorError::RowTransform {
                    line: line_no,
                    source,
                })?;
            rows.push(record);
        }

        summary.rows_processed = rows.len();
        debug!(
            rows = rows.len(),
            ragged = summary.ragged_rows.len(),
            "parsed csv"
        );

        Ok(Table {
            id: TableId::next(),
            has_header: options.has_header,
            header,
            columns,
            rows,
            field_count: field_count.unwrap_or(0),
            summary,
        })
    }

    /// Memory-maps `path` and parses it with `transform`
    ///
    /// # Errors
    /// I/O errors opening or mapping the file, [`ProcessorError::Utf8`] for
    /// non UTF-8 content, plus everything [`Table::parse_with`] reports.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load_csv_with<F>(
        path: &Path,
        options: TableOptions,
        transform: &F,
    ) -> Result<Self, ProcessorError>
    where
        F: RowTransform<Output = T>,
    {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Self::parse_with(io::empty(), options, transform);
        }

        // SAFETY: the map is read-only and dropped before returning; every
        // row is copied out of it during parsing
        let mmap = unsafe { Mmap::map(&file)? };
        let text = std::str::from_utf8(&mmap)?;
        let table = Self::parse_with(text.as_bytes(), options, transform)?;

        info!(rows = table.row_count(), "loaded csv");
        Ok(table)
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Data rows in source order; the header is never among them
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    pub fn columns(&self) -> &ColumnIndex {
        &self.columns
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header width, or the first data row's width without a header
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    /// No header line and no data rows were read
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}
