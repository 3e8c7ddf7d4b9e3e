//! Edge-orientation semantics for traversal.
//!
//! The host call names its orientation with a literal such as
//! `'directed - edge_orientation'`. The part after the dash is the host's
//! per-edge orientation column; by the time an edge list reaches this
//! engine those per-edge orientations are already resolved into ordered
//! pairs, so only the leading keyword selects behavior here.

use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// How edges are followed during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Follow edges from source to target.
    #[default]
    Directed,
    /// Follow every edge backward: the exact transpose of `Directed`.
    Reversed,
    /// Ignore edge direction; distance is symmetric.
    Undirected,
}

impl Orientation {
    /// Parse a host orientation literal.
    ///
    /// Accepts `"directed - <column>"`, `"reversed - <column>"` and
    /// `"undirected"`, case-insensitively. Anything else is
    /// [`AnalysisError::InvalidOrientation`].
    pub fn parse(literal: &str) -> Result<Self, AnalysisError> {
        let text = literal.trim();
        let (head, suffix) = match text.split_once('-') {
            Some((head, suffix)) => (head.trim(), Some(suffix.trim())),
            None => (text, None),
        };
        match suffix {
            None if head.eq_ignore_ascii_case("undirected") => Ok(Self::Undirected),
            Some(column) if !column.is_empty() => {
                if head.eq_ignore_ascii_case("directed") {
                    Ok(Self::Directed)
                } else if head.eq_ignore_ascii_case("reversed") {
                    Ok(Self::Reversed)
                } else {
                    Err(AnalysisError::InvalidOrientation(literal.to_string()))
                }
            }
            _ => Err(AnalysisError::InvalidOrientation(literal.to_string())),
        }
    }
}

impl FromStr for Orientation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directed => write!(f, "directed"),
            Self::Reversed => write!(f, "reversed"),
            Self::Undirected => write!(f, "undirected"),
        }
    }
}
