//! Index-spec parsing for relform.
//!
//! An index spec designates a combination of positions in a collection of known
//! length. It is a comma-separated list of terms, optionally wrapped in brackets:
//!
//! * `2`, `-1` - a single index (negative values count from the end)
//! * `[0,2,4]` - a list of indices
//! * `[1:5]`, `[::2]`, `[5:0:-1]` - `start:stop:step` slices; bounds are clamped and may be negative
//! * `[0,2:5,7]` - any mix of the above
//!
//! Every index is normalized against the collection length before it is used, so
//! resolved positions are always inside `0..len`.
//!
//! ```
//! use relform_index::IndexSpec;
//!
//! let spec: IndexSpec = "[0,2:5,-1]".parse().unwrap();
//! let positions: Vec<usize> = spec.resolve(8).into_iter().collect();
//! assert_eq!(positions, vec![0, 2, 3, 4, 7]);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexSpecError {
    #[error("index spec is empty")]
    Empty,
    #[error("unbalanced brackets in index spec '{0}'")]
    UnbalancedBrackets(String),
    #[error("empty term in index spec '{0}'")]
    EmptyTerm(String),
    #[error("invalid integer '{value}' in index term '{term}'")]
    InvalidInteger { term: String, value: String },
    #[error("too many ':' in slice term '{0}' (expected start:stop or start:stop:step)")]
    TooManyColons(String),
    #[error("slice step cannot be zero in term '{0}'")]
    ZeroStep(String),
}

/// `start:stop:step` slice bounds; `None` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRange {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceRange {
    /// Positions visited by the slice over `0..len`, in step order. Bounds are clamped
    /// to the collection; a negative step walks backwards from the end.
    ///
    /// ```
    /// use relform_index::SliceRange;
    ///
    /// let reversed = SliceRange { start: None, stop: None, step: Some(-1) };
    /// assert_eq!(reversed.positions(4), vec![3, 2, 1, 0]);
    /// ```
    pub fn positions(&self, len: usize) -> Vec<usize> {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let step = self.step.unwrap_or(1);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let bound = |value: Option<i64>, default: i64| match value {
            None => default,
            Some(v) if v < 0 => v.saturating_add(len).max(lower),
            Some(v) => v.min(upper),
        };
        let start = bound(self.start, if step < 0 { upper } else { lower });
        let stop = bound(self.stop, if step < 0 { lower } else { upper });

        let mut out = Vec::new();
        let mut i = start;
        if step > 0 {
            while i < stop {
                out.push(i as usize);
                i = i.saturating_add(step);
            }
        } else {
            while i > stop {
                out.push(i as usize);
                i = i.saturating_add(step);
            }
        }
        out
    }
}

impl fmt::Display for SliceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
        write!(f, "{}:{}", part(self.start), part(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTerm {
    Single(i64),
    Range(SliceRange),
}

impl IndexTerm {
    /// Positions designated by this term in a collection of `len` elements.
    ///
    /// A single index is normalized (`-1` is the last element) and dropped when it
    /// falls outside the collection.
    pub fn positions(&self, len: usize) -> Vec<usize> {
        match self {
            IndexTerm::Single(i) => normalize(*i, len).into_iter().collect(),
            IndexTerm::Range(range) => range.positions(len),
        }
    }
}

impl fmt::Display for IndexTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTerm::Single(i) => write!(f, "{i}"),
            IndexTerm::Range(range) => write!(f, "{range}"),
        }
    }
}

/// Map a possibly negative index onto `0..len`.
pub fn normalize(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index.checked_add(len)? } else { index };
    (0..len).contains(&index).then_some(index as usize)
}

/// A parsed index spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSpec {
    terms: Vec<IndexTerm>,
}

impl IndexSpec {
    pub fn parse(spec: &str) -> Result<Self, IndexSpecError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(IndexSpecError::Empty);
        }

        let inner = match (trimmed.starts_with('['), trimmed.ends_with(']')) {
            (true, true) if trimmed.len() >= 2 => &trimmed[1..trimmed.len() - 1],
            (false, false) => trimmed,
            _ => return Err(IndexSpecError::UnbalancedBrackets(spec.to_string())),
        };
        if inner.contains('[') || inner.contains(']') {
            return Err(IndexSpecError::UnbalancedBrackets(spec.to_string()));
        }
        if inner.trim().is_empty() {
            return Ok(Self::default());
        }

        let terms = inner
            .split(',')
            .map(|term| parse_term(spec, term.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The set of positions in `0..len` designated by this spec.
    pub fn resolve(&self, len: usize) -> BTreeSet<usize> {
        self.terms.iter().flat_map(|t| t.positions(len)).collect()
    }

    /// Positions in term order, duplicates kept.
    ///
    /// ```
    /// use relform_index::IndexSpec;
    ///
    /// let spec = IndexSpec::parse("[3,0:2,0]").unwrap();
    /// assert_eq!(spec.positions(5), vec![3, 0, 1, 0]);
    /// ```
    pub fn positions(&self, len: usize) -> Vec<usize> {
        self.terms.iter().flat_map(|t| t.positions(len)).collect()
    }

    /// Slice a list with this spec, keeping term order.
    ///
    /// ```
    /// use relform_index::IndexSpec;
    ///
    /// let items = ["a", "b", "c", "d", "e"];
    /// let spec = IndexSpec::parse("-2:").unwrap();
    /// assert_eq!(spec.select(&items), vec![&"d", &"e"]);
    /// ```
    pub fn select<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.positions(items.len())
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }
}

impl FromStr for IndexSpec {
    type Err = IndexSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{term}")?;
        }
        f.write_str("]")
    }
}

/// Parse `spec` and resolve it against `len` in one step.
pub fn resolve(spec: &str, len: usize) -> Result<BTreeSet<usize>, IndexSpecError> {
    Ok(IndexSpec::parse(spec)?.resolve(len))
}

fn parse_term(spec: &str, term: &str) -> Result<IndexTerm, IndexSpecError> {
    if term.is_empty() {
        return Err(IndexSpecError::EmptyTerm(spec.to_string()));
    }
    if !term.contains(':') {
        return parse_int(term, term).map(IndexTerm::Single);
    }

    let parts: Vec<&str> = term.split(':').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(IndexSpecError::TooManyColons(term.to_string()));
    }
    let component = |idx: usize| -> Result<Option<i64>, IndexSpecError> {
        match parts.get(idx) {
            Some(value) if !value.is_empty() => parse_int(term, value).map(Some),
            _ => Ok(None),
        }
    };

    let range = SliceRange {
        start: component(0)?,
        stop: component(1)?,
        step: component(2)?,
    };
    if range.step == Some(0) {
        return Err(IndexSpecError::ZeroStep(term.to_string()));
    }
    Ok(IndexTerm::Range(range))
}

fn parse_int(term: &str, value: &str) -> Result<i64, IndexSpecError> {
    value
        .parse::<i64>()
        .map_err(|_| IndexSpecError::InvalidInteger {
            term: term.to_string(),
            value: value.to_string(),
        })
}
