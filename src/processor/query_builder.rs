use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::trace;

use crate::processor::{
    ProcessorError, Row, SearchOutcome,
    table::{Table, TableId},
};

const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Cache key for one search against one table
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct QueryKey {
    pub table: TableId,
    /// Trimmed, lower-cased value
    pub value: String,
    pub column: Option<String>,
}

impl QueryKey {
    pub fn new(table: TableId, value: &str, column: Option<&str>) -> Self {
        QueryKey {
            table,
            value: value.trim().to_lowercase(),
            column: column.map(str::to_string),
        }
    }
}

/// LRU of search outcomes
///
/// Entries are keyed by the table they were computed on, so one cache can
/// serve several tables. Only successful outcomes are stored.
#[derive(Debug)]
pub struct QueryCache {
    cache: RefCell<LruCache<QueryKey, SearchOutcome>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<SearchOutcome> {
        self.cache.borrow_mut().get(key).cloned()
    }

    pub fn put(&self, key: QueryKey, value: SearchOutcome) {
        self.cache.borrow_mut().put(key, value);
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent search over a loaded table
///
/// # Example
/// ```rust
/// # use csv_search::{QueryCache, Table, TableOptions};
/// let table = Table::parse_str("State,Race\nRI,White\n", TableOptions::with_header()).unwrap();
/// let cache = QueryCache::new();
/// let outcome = table.query("White").column("Race").with_cache(&cache).execute().unwrap();
/// assert_eq!(outcome.match_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery<'t> {
    table: &'t Table,
    cache: Option<&'t QueryCache>,
    value: String,
    column: Option<String>,
}

impl<'t> SearchQuery<'t> {
    pub fn new(table: &'t Table, value: &str) -> Self {
        Self {
            table,
            cache: None,
            value: value.to_string(),
            column: None,
        }
    }

    /// Restrict the search to a header name or zero-based position
    pub fn column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    /// Consult and fill `cache`
    pub fn with_cache(mut self, cache: &'t QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Disable caching
    pub fn no_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn execute(self) -> Result<SearchOutcome, ProcessorError> {
        let Some(cache) = self.cache else {
            return self.table.search(&self.value, self.column.as_deref());
        };

        let key = QueryKey::new(self.table.id(), &self.value, self.column.as_deref());
        if let Some(outcome) = cache.get(&key) {
            trace!(value = %key.value, "query cache hit");
            return Ok(outcome);
        }

        let outcome = self.table.search(&self.value, self.column.as_deref())?;
        cache.put(key, outcome.clone());
        Ok(outcome)
    }
}

impl Table<Row> {
    pub fn query(&self, value: &str) -> SearchQuery<'_> {
        SearchQuery::new(self, value)
    }
}
