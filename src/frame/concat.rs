//! Row-axis concatenation of feature frames.

use std::collections::HashSet;

use serde::Deserialize;

use super::FeatureFrame;
use crate::error::FrameError;

/// How concatenation treats frames whose column sets differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPolicy {
    /// Every frame must carry the first frame's column set; columns are
    /// aligned by name. A differing set is a `SchemaMismatch`.
    #[default]
    Strict,
    /// Output carries the union of all columns in order of first
    /// appearance; cells missing from a frame are `NaN`.
    Union,
}

impl SchemaPolicy {
    /// Parses a policy name (`"strict"` or `"union"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::Strict),
            "union" => Some(Self::Union),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Union => "union",
        }
    }
}

/// Concatenates frames along the row axis, in iteration order.
///
/// Every row of every frame appears in the output, frame by frame. No
/// frames at all yields [`FeatureFrame::empty`] under either policy.
///
/// # Errors
///
/// Returns `FrameError::SchemaMismatch` under [`SchemaPolicy::Strict`] for
/// the first frame whose column set differs from the first frame's.
pub fn concat<'a, I>(frames: I, policy: SchemaPolicy) -> Result<FeatureFrame, FrameError>
where
    I: IntoIterator<Item = &'a FeatureFrame>,
{
    let frames: Vec<&FeatureFrame> = frames.into_iter().collect();
    let Some(first) = frames.first() else {
        return Ok(FeatureFrame::empty());
    };

    let names = match policy {
        SchemaPolicy::Strict => strict_columns(first, &frames)?,
        SchemaPolicy::Union => union_columns(&frames),
    };

    let n_rows: usize = frames.iter().map(|f| f.n_rows()).sum();
    let mut columns: Vec<Vec<f64>> = names.iter().map(|_| Vec::with_capacity(n_rows)).collect();
    for frame in &frames {
        for (name, out) in names.iter().zip(columns.iter_mut()) {
            match frame.column(name) {
                Some(values) => out.extend_from_slice(values),
                None => out.extend(std::iter::repeat_n(f64::NAN, frame.n_rows())),
            }
        }
    }

    Ok(FeatureFrame::from_parts(names, columns, n_rows))
}

fn strict_columns(first: &FeatureFrame, frames: &[&FeatureFrame]) -> Result<Vec<String>, FrameError> {
    for (batch, frame) in frames.iter().enumerate().skip(1) {
        let same_set = frame.n_cols() == first.n_cols()
            && first
                .column_names()
                .iter()
                .all(|name| frame.column_index(name).is_some());
        if !same_set {
            return Err(FrameError::SchemaMismatch {
                batch,
                expected: first.column_names().to_vec(),
                found: frame.column_names().to_vec(),
            });
        }
    }
    Ok(first.column_names().to_vec())
}

fn union_columns(frames: &[&FeatureFrame]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for frame in frames {
        for name in frame.column_names() {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
    }
    names
}
