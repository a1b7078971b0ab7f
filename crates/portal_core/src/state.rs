use std::sync::Arc;

use crate::view_model::{ListStatus, ListViewModel, ModalView, Projection};
use crate::{Editable, FilterState, ScopeHeader, SortKey};

/// Dialog currently open on a list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<T: Editable> {
    Create,
    Edit(T),
    View(T),
    Delete(T),
}

impl<T: Editable> Modal<T> {
    fn view(&self) -> ModalView {
        match self {
            Modal::Create => ModalView::Create,
            Modal::Edit(item) => ModalView::Edit {
                id: item.id().to_owned(),
            },
            Modal::View(item) => ModalView::View {
                id: item.id().to_owned(),
            },
            Modal::Delete(item) => ModalView::Delete {
                id: item.id().to_owned(),
            },
        }
    }
}

/// State of one list screen: the fetched snapshot, the user's filter and sort
/// choices, the open dialog and the cached projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListScreen<T: Editable> {
    scope_id: Option<String>,
    status: ListStatus,
    header: Option<ScopeHeader>,
    items: Option<Arc<[T]>>,
    search_draft: String,
    filter: FilterState<T>,
    sort: SortKey<T::SortField>,
    modal: Option<Modal<T>>,
    submitting: bool,
    projection: Projection<T>,
    dirty: bool,
}

impl<T: Editable> Default for ListScreen<T> {
    fn default() -> Self {
        let mut screen = Self {
            scope_id: None,
            status: ListStatus::Idle,
            header: None,
            items: None,
            search_draft: String::new(),
            filter: FilterState::default(),
            sort: T::DEFAULT_SORT,
            modal: None,
            submitting: false,
            projection: Projection::new(),
            dirty: false,
        };
        screen
            .projection
            .refresh(None, &screen.filter, screen.sort);
        screen
    }
}

impl<T: Editable> ListScreen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ListViewModel<T> {
        ListViewModel {
            status: self.status.clone(),
            rows: self.projection.rows(),
            total_count: self.items.as_ref().map_or(0, |items| items.len()),
            search_draft: self.search_draft.clone(),
            filter: self.filter.clone(),
            sort: self.sort,
            modal: self.modal.as_ref().map(Modal::view),
            submitting: self.submitting,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn scope_id(&self) -> Option<&str> {
        self.scope_id.as_deref()
    }

    pub fn header(&self) -> Option<&ScopeHeader> {
        self.header.as_ref()
    }

    /// Unfiltered snapshot from the last successful fetch.
    pub fn items(&self) -> Option<&Arc<[T]>> {
        self.items.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal<T>> {
        self.modal.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.as_ref()?.iter().find(|item| item.id() == id)
    }

    pub(crate) fn select_scope(&mut self, scope_id: String) {
        self.scope_id = Some(scope_id);
        self.header = None;
        self.items = None;
        self.modal = None;
        self.status = ListStatus::Loading;
        self.mark_dirty();
    }

    /// Keeps the previous snapshot visible while loading.
    pub(crate) fn begin_loading(&mut self) {
        self.status = ListStatus::Loading;
        self.mark_dirty();
    }

    pub(crate) fn apply_header(&mut self, header: ScopeHeader) {
        if self.header.as_ref() != Some(&header) {
            self.header = Some(header);
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_loaded(&mut self, items: Vec<T>) {
        self.items = Some(Arc::from(items));
        self.status = ListStatus::Ready;
        self.mark_dirty();
    }

    pub(crate) fn apply_failed(&mut self, message: String) {
        self.items = None;
        self.status = ListStatus::Failed { message };
        self.mark_dirty();
    }

    pub(crate) fn set_search_draft(&mut self, text: String) {
        if self.search_draft != text {
            self.search_draft = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn submit_search(&mut self) {
        let term = self.search_draft.clone();
        self.set_search_term(term);
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.set_search_draft(term.clone());
        if self.filter.search_term != term {
            self.filter.search_term = term;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_search_by(&mut self, field: Option<T::SearchField>) {
        if self.filter.search_by != field {
            self.filter.search_by = field;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status_filter(&mut self, status: Option<T::Status>) {
        if self.filter.status != status {
            self.filter.status = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_sort(&mut self, sort: SortKey<T::SortField>) {
        if self.sort != sort {
            self.sort = sort;
            self.mark_dirty();
        }
    }

    pub(crate) fn open_modal(&mut self, modal: Modal<T>) {
        self.modal = Some(modal);
        self.mark_dirty();
    }

    pub(crate) fn close_modal(&mut self) {
        if self.modal.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_mutation(&mut self) {
        self.submitting = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_mutation(&mut self) {
        self.submitting = false;
        self.mark_dirty();
    }

    pub(crate) fn refresh_projection(&mut self) {
        if self
            .projection
            .refresh(self.items.as_ref(), &self.filter, self.sort)
        {
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
