use crate::ListItem;

/// Search and status restrictions applied before sorting.
///
/// An empty `search_term` and a `None` status both mean "no restriction".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState<T: ListItem> {
    pub search_term: String,
    /// Restricts text matching to one field; `None` uses the item's defaults.
    pub search_by: Option<T::SearchField>,
    pub status: Option<T::Status>,
}

impl<T: ListItem> Default for FilterState<T> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            search_by: None,
            status: None,
        }
    }
}

impl<T: ListItem> FilterState<T> {
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty() && self.status.is_none()
    }
}

/// Filter predicate: text match AND status match.
pub fn matches<T: ListItem>(item: &T, filter: &FilterState<T>) -> bool {
    text_matches(item, filter) && status_matches(item, filter)
}

fn text_matches<T: ListItem>(item: &T, filter: &FilterState<T>) -> bool {
    if filter.search_term.is_empty() {
        return true;
    }
    let needle = filter.search_term.to_lowercase();
    let fields: &[T::SearchField] = match &filter.search_by {
        Some(field) => std::slice::from_ref(field),
        None => T::DEFAULT_SEARCH_FIELDS,
    };
    fields.iter().any(|field| {
        item.search_texts(*field)
            .into_iter()
            .any(|text| text.to_lowercase().contains(&needle))
    })
}

fn status_matches<T: ListItem>(item: &T, filter: &FilterState<T>) -> bool {
    filter.status.map_or(true, |status| item.status() == status)
}
