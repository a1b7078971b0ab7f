use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::SortKey;

/// One record of a fetched collection, as seen by the filter, sort and
/// projection stages.
pub trait ListItem: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Free-text fields a search term can be matched against.
    type SearchField: Copy + Eq + fmt::Debug + Send + Sync + 'static;
    /// Categorical value compared by the status filter.
    type Status: Copy + Eq + fmt::Debug + Send + Sync + 'static;
    /// Fields the comparator registry can order by.
    type SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    /// Fields consulted when the user has not picked a "search by" field.
    const DEFAULT_SEARCH_FIELDS: &'static [Self::SearchField];
    const DEFAULT_SORT: SortKey<Self::SortField>;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;

    /// Texts to match for `field`. A missing value yields no candidates.
    fn search_texts(&self, field: Self::SearchField) -> Vec<&str>;
    fn status(&self) -> Self::Status;
    fn sort_value(&self, field: Self::SortField) -> SortValue;
}

/// Value extracted from a record for ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Missing timestamps order before present ones.
    Time(Option<DateTime<Utc>>),
    Number(f64),
}

impl SortValue {
    /// Ascending order. Values of different kinds compare equal.
    pub fn ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized key: {input:?}")]
pub struct ParseKeyError {
    pub input: String,
}

impl ParseKeyError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Gives a field-less enum a stable text form (`Display` + `FromStr`).
macro_rules! text_keys {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::ParseKeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err($crate::ParseKeyError { input: other.to_owned() }),
                }
            }
        }
    };
}

pub(crate) use text_keys;
