use std::fmt;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Value – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// `Null` is the distinguished missing marker: it is counted by nothing
/// and ignored by every numeric aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether this is the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Dataset – ordered named columns of equal length
// ---------------------------------------------------------------------------

/// A tabular dataset: ordered named columns, each an equal-length sequence
/// of [`Value`]s. Read-only once built; the statistics and rendering layers
/// never mutate it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from parallel name / column vectors.
    ///
    /// Fails if the counts differ or the columns are ragged.
    pub fn new(names: Vec<String>, columns: Vec<Vec<Value>>) -> Result<Self, Error> {
        if names.len() != columns.len() {
            return Err(Error::ColumnCount {
                got: columns.len(),
                want: names.len(),
            });
        }
        if let Some(first) = columns.first() {
            let want = first.len();
            for (name, column) in names.iter().zip(&columns) {
                if column.len() != want {
                    return Err(Error::ColumnLength {
                        name: name.clone(),
                        got: column.len(),
                        want,
                    });
                }
            }
        }
        Ok(Dataset { names, columns })
    }

    /// Build a dataset from row-oriented data. Each row must have exactly
    /// one cell per column name.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, Error> {
        let mut columns: Vec<Vec<Value>> = (0..names.len())
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(Error::RowLength {
                    row: i,
                    got: row.len(),
                    want: names.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Ok(Dataset { names, columns })
    }

    /// Ordered column names.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Iterate over rows in order, each row one `&Value` per column.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.n_rows()).map(move |i| self.columns.iter().map(|c| &c[i]).collect())
    }
}
