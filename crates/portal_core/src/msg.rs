use chrono::{DateTime, Utc};

use crate::{Editable, MutationKind, ScopeHeader, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg<T: Editable> {
    /// Screen opened for an organization / campaign.
    ScopeSelected(String),
    /// Collection query resolved.
    CollectionLoaded(Vec<T>),
    /// Details of the selected scope, delivered before its collection.
    HeaderLoaded(ScopeHeader),
    /// Collection query failed; carries the upstream message.
    CollectionFailed(String),
    /// User asked to reload after a failure.
    RefreshClicked,
    /// User typed in the search box (not yet submitted).
    SearchInputChanged(String),
    /// Enter key or search button.
    SearchSubmitted,
    /// Debounced live search.
    SearchChanged(String),
    SearchByChanged(Option<T::SearchField>),
    StatusFilterChanged(Option<T::Status>),
    SortChanged(SortKey<T::SortField>),
    /// `at` is checked against the scope's open window.
    CreateClicked { at: DateTime<Utc> },
    EditClicked { id: String },
    ViewClicked { id: String },
    DeleteClicked { id: String },
    ModalClosed,
    /// Create/edit form submitted with the given field values.
    FormSubmitted(T::Draft),
    DeleteConfirmed,
    MutationSucceeded(MutationKind),
    MutationFailed { kind: MutationKind, message: String },
    /// A result that no longer applies, such as a collection that arrived
    /// after the user switched scope. Changes nothing.
    NoOp,
}
