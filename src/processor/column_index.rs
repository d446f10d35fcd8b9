use std::collections::HashMap;

use crate::processor::ProcessorError;

/// Header name to column position mapping.
///
/// Names are case-sensitive and unique. Built once from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl ColumnIndex {
    /// Builds the mapping from a header row.
    ///
    /// # Errors
    /// [`ProcessorError::DuplicateHeader`] when two cells carry the same text.
    pub fn from_header(header: &[String]) -> Result<Self, ProcessorError> {
        let mut positions = HashMap::with_capacity(header.len());

        for (idx, name) in header.iter().enumerate() {
            if let Some(&first) = positions.get(name) {
                return Err(ProcessorError::DuplicateHeader {
                    name: name.clone(),
                    first,
                    second: idx,
                });
            }
            positions.insert(name.clone(), idx);
        }

        Ok(ColumnIndex {
            positions,
            names: header.to_vec(),
        })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn name_of(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// Column names in header order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
