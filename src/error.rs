use thiserror::Error;

// ---------------------------------------------------------------------------
// Library error type
// ---------------------------------------------------------------------------

/// Failures surfaced by dataset construction, statistics, and table
/// rendering. Every failure is fatal to the single call that produced it;
/// there is no cross-call state to corrupt.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested column name does not exist in the dataset.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The number of columns does not match the number of column names.
    #[error("{got} columns provided for {want} column names")]
    ColumnCount { got: usize, want: usize },

    /// Columns of a dataset must all have the same length.
    #[error("column '{name}' has {got} values, expected {want}")]
    ColumnLength {
        name: String,
        got: usize,
        want: usize,
    },

    /// A table row does not have one cell per declared column.
    #[error("row {row} has {got} cells, expected {want}")]
    RowLength { row: usize, got: usize, want: usize },

    /// An operation over a collection of datasets received none.
    #[error("no datasets provided")]
    NoDatasets,

    /// Merging datasets that share no column names.
    #[error("datasets share no common columns")]
    NoCommonColumns,
}
