use tracing::{debug, instrument};

use crate::{
    helpers::word_match::WordMatcher,
    processor::{OtherColumns, ProcessorError, Row, SearchOutcome, table::Table},
};

/// Which column a search is restricted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Every cell of every row is eligible
    Unspecified,
    /// The selector parsed as an in-range column position
    NumericIndex(usize),
    /// The selector named a header column
    Name { name: String, index: usize },
}

impl ColumnSelector {
    /// Resolves a raw user selector against `table`.
    ///
    /// An absent or blank selector is [`ColumnSelector::Unspecified`]. A
    /// selector that parses as an integer in `[0, field_count)` is always a
    /// [`ColumnSelector::NumericIndex`], even when a header carries the same
    /// text. Anything else must be a header name.
    ///
    /// # Errors
    /// [`ProcessorError::InvalidSelector`] listing the header names when the
    /// selector is neither.
    pub fn resolve(raw: Option<&str>, table: &Table) -> Result<Self, ProcessorError> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(ColumnSelector::Unspecified),
        };

        if let Ok(index) = raw.parse::<usize>() {
            if index < table.field_count() {
                return Ok(ColumnSelector::NumericIndex(index));
            }
        }

        match table.columns().position(raw) {
            Some(index) => Ok(ColumnSelector::Name {
                name: raw.to_string(),
                index,
            }),
            None => Err(ProcessorError::InvalidSelector {
                selector: raw.to_string(),
                valid_columns: table.columns().names().to_vec(),
            }),
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            ColumnSelector::Unspecified => None,
            ColumnSelector::NumericIndex(index) | ColumnSelector::Name { index, .. } => {
                Some(*index)
            }
        }
    }
}

impl Table<Row> {
    /// Resolves a raw column selector against this table
    pub fn resolve_selector(&self, raw: Option<&str>) -> Result<ColumnSelector, ProcessorError> {
        ColumnSelector::resolve(raw, self)
    }

    /// Searches the table for `value`, optionally restricted to `column`
    ///
    /// `column` is a header name or a zero-based position given as text. A
    /// restricted search that misses its column but hits another one returns
    /// [`SearchOutcome::FoundElsewhere`] instead of [`SearchOutcome::NoMatch`].
    ///
    /// # Errors
    /// Returns a [`ProcessorError`] if:
    /// - a header was expected but the source had no lines ([`ProcessorError::EmptyTable`])
    /// - `value` is blank ([`ProcessorError::EmptyQuery`])
    /// - `column` is neither a valid position nor a header name
    ///
    /// # Example
    /// ```rust
    /// # use csv_search::{SearchOutcome, Table, TableOptions};
    /// let table = Table::parse_str("State,Race\nRI,White\n", TableOptions::with_header()).unwrap();
    /// let outcome = table.search("white", Some("Race")).unwrap();
    /// assert_eq!(outcome.match_count(), 1);
    /// ```
    #[instrument(level = "debug", skip(self), fields(rows = self.row_count()))]
    pub fn search(&self, value: &str, column: Option<&str>) -> Result<SearchOutcome, ProcessorError> {
        if self.is_empty() {
            return if self.has_header() {
                Err(ProcessorError::EmptyTable)
            } else {
                Ok(SearchOutcome::NoMatch)
            };
        }

        let matcher = WordMatcher::new(value);
        if matcher.value().is_empty() {
            return Err(ProcessorError::EmptyQuery);
        }

        let selector = self.resolve_selector(column)?;
        let hits = self.filter(&selector, &matcher);

        if !hits.is_empty() {
            debug!(matches = hits.len(), ?selector, "search hit");
            return Ok(SearchOutcome::Found {
                header: self.header().cloned(),
                rows: hits.into_iter().map(|i| self.rows()[i].clone()).collect(),
            });
        }

        let outcome = match selector.index() {
            Some(index) => self.other_columns(&selector, index, &matcher),
            None => None,
        }
        .map_or(SearchOutcome::NoMatch, SearchOutcome::FoundElsewhere);

        debug!(?selector, ?outcome, "search missed");
        Ok(outcome)
    }

    /// Positions of the data rows matching `matcher` under `selector`
    pub fn filter(&self, selector: &ColumnSelector, matcher: &WordMatcher) -> Vec<usize> {
        let mut out = Vec::new();
        for (i, row) in self.rows().iter().enumerate() {
            let hit = match selector.index() {
                None => row.iter().any(|cell| matcher.matches(cell)),
                Some(k) => row.get(k).is_some_and(|cell| matcher.matches(cell)),
            };
            if hit {
                out.push(i);
            }
        }
        out
    }

    /// Columns besides `skip` that hold a match, in first-seen order
    fn other_columns(
        &self,
        selector: &ColumnSelector,
        skip: usize,
        matcher: &WordMatcher,
    ) -> Option<OtherColumns> {
        let mut found: Vec<usize> = Vec::new();
        for row in self.rows() {
            for (j, cell) in row.iter().enumerate() {
                if j != skip && !found.contains(&j) && matcher.matches(cell) {
                    found.push(j);
                }
            }
        }

        if found.is_empty() {
            return None;
        }

        let report = match selector {
            ColumnSelector::Name { .. } if self.has_header() => OtherColumns::Names(
                found
                    .into_iter()
                    .map(|j| {
                        self.columns()
                            .name_of(j)
                            .map_or_else(|| j.to_string(), str::to_string)
                    })
                    .collect(),
            ),
            _ => OtherColumns::Indices(found),
        };
        Some(report)
    }
}
