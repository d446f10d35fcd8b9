use memchr::memmem::Finder;

/// Case-insensitive cell predicate for one search value.
///
/// A cell matches when its trimmed, lower-cased text equals the value, or
/// when the value occurs in the lower-cased cell with a non-alphanumeric
/// character (or the cell edge) on both sides. `cat` matches `the cat sat`
/// and `cat,dog` but not `category`.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    value: String,
    finder: Finder<'static>,
}

impl WordMatcher {
    pub fn new(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        let finder = Finder::new(value.as_bytes()).into_owned();
        WordMatcher { value, finder }
    }

    /// The folded value being matched
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, cell: &str) -> bool {
        let cell = cell.to_lowercase();
        cell.trim() == self.value || self.contains_word(&cell)
    }

    fn contains_word(&self, haystack: &str) -> bool {
        if self.value.is_empty() {
            return false;
        }

        let bytes = haystack.as_bytes();
        let mut from = 0;
        // occurrences may overlap, so step one byte past each hit
        while let Some(offset) = self.finder.find(&bytes[from..]) {
            let start = from + offset;
            let end = start + self.value.len();
            if is_boundary_before(haystack, start) && is_boundary_after(haystack, end) {
                return true;
            }
            from = start + 1;
        }
        false
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

// `idx` is always the start or end of a match of valid UTF-8, hence a char boundary
fn is_boundary_before(s: &str, idx: usize) -> bool {
    s[..idx].chars().next_back().is_none_or(|c| !is_word_char(c))
}

fn is_boundary_after(s: &str, idx: usize) -> bool {
    s[idx..].chars().next().is_none_or(|c| !is_word_char(c))
}
