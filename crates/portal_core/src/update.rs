use chrono::{DateTime, Utc};

use crate::scope::SCOPE_NOT_ACTIVE;
use crate::{Changeset, Editable, Effect, ListScreen, Modal, Msg, MutationCommand, Notification};

/// Warning shown when a collection or create is requested without a scope.
const MISSING_SCOPE: &str = "missingScope";

/// Pure update function: applies a message to state and returns any effects.
pub fn update<T: Editable>(
    mut state: ListScreen<T>,
    msg: Msg<T>,
) -> (ListScreen<T>, Vec<Effect<T>>) {
    let effects = match msg {
        Msg::ScopeSelected(scope_id) => {
            let scope_id = scope_id.trim();
            if scope_id.is_empty() {
                vec![Effect::Notify(Notification::warning(MISSING_SCOPE))]
            } else {
                state.select_scope(scope_id.to_owned());
                vec![Effect::FetchCollection {
                    scope_id: scope_id.to_owned(),
                }]
            }
        }
        Msg::CollectionLoaded(items) => {
            state.apply_loaded(items);
            Vec::new()
        }
        Msg::HeaderLoaded(header) => {
            state.apply_header(header);
            Vec::new()
        }
        Msg::CollectionFailed(message) => {
            state.apply_failed(message);
            Vec::new()
        }
        Msg::RefreshClicked => refetch(&mut state).into_iter().collect(),
        Msg::SearchInputChanged(text) => {
            state.set_search_draft(text);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            state.submit_search();
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            state.set_search_term(text);
            Vec::new()
        }
        Msg::SearchByChanged(field) => {
            state.set_search_by(field);
            Vec::new()
        }
        Msg::StatusFilterChanged(status) => {
            state.set_status_filter(status);
            Vec::new()
        }
        Msg::SortChanged(sort) => {
            state.set_sort(sort);
            Vec::new()
        }
        Msg::CreateClicked { at } => open_create(&mut state, at),
        Msg::EditClicked { id } => {
            open_for(&mut state, &id, Modal::Edit);
            Vec::new()
        }
        Msg::ViewClicked { id } => {
            open_for(&mut state, &id, Modal::View);
            Vec::new()
        }
        Msg::DeleteClicked { id } => {
            open_for(&mut state, &id, Modal::Delete);
            Vec::new()
        }
        Msg::ModalClosed => {
            state.close_modal();
            Vec::new()
        }
        Msg::FormSubmitted(draft) => submit_form(&mut state, draft),
        Msg::DeleteConfirmed => confirm_delete(&mut state),
        Msg::MutationSucceeded(kind) => {
            state.finish_mutation();
            state.close_modal();
            let mut effects = Vec::with_capacity(2);
            effects.extend(refetch(&mut state));
            effects.push(Effect::Notify(Notification::success(
                T::MESSAGES.success_for(kind),
            )));
            effects
        }
        Msg::MutationFailed { message, .. } => {
            // The dialog stays open so the user can retry or cancel.
            state.finish_mutation();
            vec![Effect::Notify(Notification::error(message))]
        }
        Msg::NoOp => Vec::new(),
    };

    state.refresh_projection();
    (state, effects)
}

fn refetch<T: Editable>(state: &mut ListScreen<T>) -> Option<Effect<T>> {
    let scope_id = state.scope_id()?.to_owned();
    state.begin_loading();
    Some(Effect::RefetchCollection { scope_id })
}

fn open_create<T: Editable>(state: &mut ListScreen<T>, at: DateTime<Utc>) -> Vec<Effect<T>> {
    if state.header().is_some_and(|header| !header.accepts_new_at(at)) {
        return vec![Effect::Notify(Notification::warning(SCOPE_NOT_ACTIVE))];
    }
    state.open_modal(Modal::Create);
    Vec::new()
}

fn open_for<T: Editable>(state: &mut ListScreen<T>, id: &str, modal: fn(T) -> Modal<T>) {
    if let Some(item) = state.find(id).cloned() {
        state.open_modal(modal(item));
    }
}

fn submit_form<T: Editable>(state: &mut ListScreen<T>, draft: T::Draft) -> Vec<Effect<T>> {
    if state.is_submitting() {
        return Vec::new();
    }
    let command = match state.modal() {
        Some(Modal::Create) => {
            let Some(scope_id) = state.scope_id() else {
                return vec![Effect::Notify(Notification::warning(MISSING_SCOPE))];
            };
            if let Err(key) = T::validate(&draft) {
                return vec![Effect::Notify(Notification::warning(key))];
            }
            MutationCommand::Create {
                scope_id: scope_id.to_owned(),
                draft,
            }
        }
        Some(Modal::Edit(original)) => {
            let patch = original.diff(&draft);
            if patch.is_empty() {
                return vec![Effect::Notify(Notification::warning(
                    T::MESSAGES.nothing_changed,
                ))];
            }
            if let Err(key) = T::validate(&draft) {
                return vec![Effect::Notify(Notification::warning(key))];
            }
            MutationCommand::Update {
                id: original.id().to_owned(),
                patch,
            }
        }
        Some(Modal::View(_)) | Some(Modal::Delete(_)) | None => return Vec::new(),
    };
    state.begin_mutation();
    vec![Effect::RunMutation(command)]
}

fn confirm_delete<T: Editable>(state: &mut ListScreen<T>) -> Vec<Effect<T>> {
    if state.is_submitting() {
        return Vec::new();
    }
    let id = match state.modal() {
        Some(Modal::Delete(item)) => item.id().to_owned(),
        _ => return Vec::new(),
    };
    state.begin_mutation();
    vec![Effect::RunMutation(MutationCommand::Delete { id })]
}
