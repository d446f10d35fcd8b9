use thiserror::Error;

use crate::processor::Row;

/// A row could not be turned into the application type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}: {row:?}")]
pub struct TransformError {
    pub message: String,
    /// The offending raw row
    pub row: Row,
}

impl TransformError {
    pub fn new(message: impl Into<String>, row: Row) -> Self {
        TransformError {
            message: message.into(),
            row,
        }
    }
}

/// Converts a raw field list into an application-level row
pub trait RowTransform {
    type Output;

    fn create(&self, row: Row) -> Result<Self::Output, TransformError>;
}

/// Passes rows through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl RowTransform for Identity {
    type Output = Row;

    fn create(&self, row: Row) -> Result<Row, TransformError> {
        Ok(row)
    }
}

impl<T, F> RowTransform for F
where
    F: Fn(Row) -> Result<T, TransformError>,
{
    type Output = T;

    fn create(&self, row: Row) -> Result<T, TransformError> {
        self(row)
    }
}
