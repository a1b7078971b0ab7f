use std::sync::Arc;

use crate::{matches, sort_rows, FilterState, ListItem, SortKey};

/// A record with its 1-based position in the filtered and sorted output.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<T> {
    pub serial_number: usize,
    pub item: T,
}

/// Filter, then sort, then number.
pub fn project<T: ListItem>(
    raw: &[T],
    filter: &FilterState<T>,
    sort: SortKey<T::SortField>,
) -> Vec<ViewRow<T>> {
    let mut selected: Vec<T> = raw
        .iter()
        .filter(|item| matches(*item, filter))
        .cloned()
        .collect();
    sort_rows(&mut selected, sort);
    selected
        .into_iter()
        .enumerate()
        .map(|(index, item)| ViewRow {
            serial_number: index + 1,
            item,
        })
        .collect()
}

/// Memoized `project`, keyed on the source collection's identity plus the
/// filter and sort values.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<T: ListItem> {
    source: Option<Arc<[T]>>,
    filter: FilterState<T>,
    sort: SortKey<T::SortField>,
    rows: Arc<[ViewRow<T>]>,
    computed: bool,
}

impl<T: ListItem> Default for Projection<T> {
    fn default() -> Self {
        Self {
            source: None,
            filter: FilterState::default(),
            sort: SortKey::Unsorted,
            rows: Arc::from(Vec::new()),
            computed: false,
        }
    }
}

impl<T: ListItem> Projection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the rows if any input changed. Returns whether it did.
    pub fn refresh(
        &mut self,
        source: Option<&Arc<[T]>>,
        filter: &FilterState<T>,
        sort: SortKey<T::SortField>,
    ) -> bool {
        let same_source = match (&self.source, source) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if self.computed && same_source && self.filter == *filter && self.sort == sort {
            return false;
        }

        self.rows = match source {
            Some(items) => Arc::from(project(items, filter, sort)),
            None => Arc::from(Vec::new()),
        };
        self.source = source.cloned();
        self.filter = filter.clone();
        self.sort = sort;
        self.computed = true;
        true
    }

    pub fn rows(&self) -> Arc<[ViewRow<T>]> {
        Arc::clone(&self.rows)
    }
}

/// Lifecycle of the collection behind a screen. "Loading" and "ready with
/// zero rows" are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Failed {
        message: String,
    },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Create,
    Edit { id: String },
    View { id: String },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<T: ListItem> {
    pub status: ListStatus,
    pub rows: Arc<[ViewRow<T>]>,
    /// Size of the unfiltered collection.
    pub total_count: usize,
    pub search_draft: String,
    pub filter: FilterState<T>,
    pub sort: SortKey<T::SortField>,
    pub modal: Option<ModalView>,
    /// A mutation is in flight; submit controls should be disabled.
    pub submitting: bool,
    pub dirty: bool,
}
