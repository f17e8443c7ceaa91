//! Typed cell values and their total ordering.
//!
//! A [`CellValue`] is the atomic content of a table cell: a number, a piece
//! of text, or nothing at all. Keeping all three in one type lets a column
//! mix values freely while still being sortable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An atomic, totally-ordered table cell.
///
/// The ordering places numbers before text and empty cells after
/// everything else:
///
/// - two numbers compare numerically (`f64::total_cmp`, so non-finite
///   values produced by degenerate divisions still order deterministically),
/// - a number sorts before any text,
/// - two texts compare lexicographically,
/// - `Empty` equals `Empty` and sorts after all other values.
///
/// Equality is defined through this ordering, not structural identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A numeric value. Integers are carried as `f64` as well.
    Number(f64),
    /// A textual value.
    Text(String),
    /// A missing value.
    #[default]
    Empty,
}

impl CellValue {
    /// Coerces a raw string into a cell value.
    ///
    /// Integer parse is attempted first, then floating-point parse; anything
    /// else is kept as text. An empty string becomes [`CellValue::Empty`].
    /// No input is rejected.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Number(i as f64);
        }
        if let Ok(x) = raw.parse::<f64>() {
            return Self::Number(x);
        }
        Self::Text(raw.to_string())
    }

    /// Returns `true` if the value is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if the value is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns `true` if the value is missing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the numeric content, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the textual content, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Empty, Empty) => Ordering::Equal,
            (Empty, _) => Ordering::Greater,
            (_, Empty) => Ordering::Less,
            (Number(_), Text(_)) => Ordering::Less,
            (Text(_), Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a decimal point, so that a cell
            // parsed from "3" renders back as "3".
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for CellValue {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}
