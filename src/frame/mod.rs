//! Tabular feature batches and row-wise concatenation.

pub mod concat;

use std::collections::HashSet;
use std::fmt;

use crate::error::FrameError;

pub use concat::SchemaPolicy;

/// A column-major table of named `f64` features.
///
/// Rows are observations (one per series at a forecasting step), columns
/// are named features. Column names are unique within a frame; a frame
/// with no columns has no rows.
///
/// # Examples
///
/// ```
/// use feature_recorder::frame::FeatureFrame;
///
/// let frame = FeatureFrame::new(vec![
///     ("t".to_string(), vec![1.0, 2.0]),
///     ("x".to_string(), vec![10.0, 11.0]),
/// ])
/// .unwrap();
/// assert_eq!(frame.n_rows(), 2);
/// assert_eq!(frame.column("x"), Some(&[10.0, 11.0][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFrame {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FeatureFrame {
    /// Builds a frame from `(name, values)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::DuplicateColumn` if a name repeats and
    /// `FrameError::ColumnLength` if the columns differ in length.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self, FrameError> {
        let n_rows = columns.first().map_or(0, |(_, values)| values.len());
        let mut seen = HashSet::with_capacity(columns.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());

        for (name, values) in columns {
            if !seen.insert(name.clone()) {
                return Err(FrameError::DuplicateColumn(name));
            }
            if values.len() != n_rows {
                return Err(FrameError::ColumnLength {
                    column: name,
                    expected: n_rows,
                    found: values.len(),
                });
            }
            names.push(name);
            data.push(values);
        }

        Ok(Self {
            names,
            columns: data,
            n_rows,
        })
    }

    /// Builds a frame from row-major data.
    ///
    /// # Arguments
    ///
    /// * `names` - Column names, in order
    /// * `rows` - One slice of values per row, each as wide as `names`
    ///
    /// # Errors
    ///
    /// Returns `FrameError::RowWidth` for a row of the wrong width and
    /// `FrameError::DuplicateColumn` if a name repeats.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: &[Vec<f64>]) -> Result<Self, FrameError> {
        let mut columns: Vec<Vec<f64>> = names.iter().map(|_| Vec::with_capacity(rows.len())).collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(FrameError::RowWidth {
                    row: i,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(*value);
            }
        }

        let pairs = names
            .iter()
            .map(|n| n.as_ref().to_string())
            .zip(columns)
            .collect();
        Self::new(pairs)
    }

    /// A frame with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenates frames along the row axis. See [`concat::concat`].
    ///
    /// # Errors
    ///
    /// Returns `FrameError::SchemaMismatch` under [`SchemaPolicy::Strict`]
    /// when a frame's column set differs from the first frame's.
    pub fn concat<'a, I>(frames: I, policy: SchemaPolicy) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = &'a FeatureFrame>,
    {
        concat::concat(frames, policy)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// True when the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.column_index(name).map(|i| self.columns[i].as_slice())
    }

    /// Values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| c[index]).collect())
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.n_rows).map(|i| self.columns.iter().map(|c| c[i]).collect())
    }

    /// Iterates over `(name, values)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Vec<f64>>, n_rows: usize) -> Self {
        Self {
            names,
            columns,
            n_rows,
        }
    }
}

impl fmt::Display for FeatureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.names {
            write!(f, "{name:>12}")?;
        }
        writeln!(f)?;
        for row in self.rows() {
            for value in row {
                write!(f, "{value:>12.4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
