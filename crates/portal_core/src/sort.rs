use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{ListItem, ParseKeyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Selected ordering for a list screen.
///
/// `Unsorted` is the explicit no-op ordering: every pair compares equal, so
/// the stable sort keeps the order the API returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey<F> {
    Unsorted,
    By { field: F, direction: SortDirection },
}

impl<F> SortKey<F> {
    pub const fn asc(field: F) -> Self {
        SortKey::By {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(field: F) -> Self {
        SortKey::By {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Comparator registry: resolves `key` to an ordering of `a` and `b`.
///
/// Descending is the reversal of the ascending comparison over the same
/// extracted value, never separate logic.
pub fn compare<T: ListItem>(a: &T, b: &T, key: SortKey<T::SortField>) -> Ordering {
    match key {
        SortKey::Unsorted => Ordering::Equal,
        SortKey::By { field, direction } => {
            let ascending = a.sort_value(field).ascending(&b.sort_value(field));
            match direction {
                SortDirection::Asc => ascending,
                SortDirection::Desc => ascending.reverse(),
            }
        }
    }
}

/// Stable in-place sort by `key`.
pub fn sort_rows<T: ListItem>(items: &mut [T], key: SortKey<T::SortField>) {
    if key == SortKey::Unsorted {
        return;
    }
    items.sort_by(|a, b| compare(a, b, key));
}

impl<F: fmt::Display> fmt::Display for SortKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Unsorted => f.write_str("none"),
            SortKey::By {
                field,
                direction: SortDirection::Asc,
            } => write!(f, "{field}_ASC"),
            SortKey::By {
                field,
                direction: SortDirection::Desc,
            } => write!(f, "{field}_DESC"),
        }
    }
}

impl<F: FromStr> FromStr for SortKey<F> {
    type Err = ParseKeyError;

    /// Parses `none`, `<field>_ASC` or `<field>_DESC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" {
            return Ok(SortKey::Unsorted);
        }
        let (field, direction) = s.rsplit_once('_').ok_or_else(|| ParseKeyError::new(s))?;
        let direction = match direction {
            "ASC" => SortDirection::Asc,
            "DESC" => SortDirection::Desc,
            _ => return Err(ParseKeyError::new(s)),
        };
        let field = field.parse().map_err(|_| ParseKeyError::new(s))?;
        Ok(SortKey::By { field, direction })
    }
}
