use std::fmt;

use crate::ListItem;

/// Field-level changes for an update command.
pub trait Changeset {
    /// True when no field differs from the original record.
    fn is_empty(&self) -> bool;
}

/// Message keys a screen shows around its mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMessages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    /// Warning shown when an edit form is submitted unchanged.
    pub nothing_changed: &'static str,
}

impl ScreenMessages {
    pub fn success_for(&self, kind: MutationKind) -> &'static str {
        match kind {
            MutationKind::Create => self.created,
            MutationKind::Update => self.updated,
            MutationKind::Delete => self.deleted,
        }
    }
}

/// A list item that can be created, edited and deleted through a form.
pub trait Editable: ListItem {
    /// Form state.
    type Draft: Clone + fmt::Debug + PartialEq + Default + Send + Sync + 'static;
    /// Changed fields only.
    type Patch: Changeset + Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    const MESSAGES: ScreenMessages;

    /// Form state seeded from an existing record.
    fn draft(&self) -> Self::Draft;

    /// Fields of `draft` that differ from `self`.
    fn diff(&self, draft: &Self::Draft) -> Self::Patch;

    /// Rejects a draft before any network call, returning a warning key.
    fn validate(_draft: &Self::Draft) -> Result<(), &'static str> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Create => f.write_str("create"),
            MutationKind::Update => f.write_str("update"),
            MutationKind::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationCommand<T: Editable> {
    Create { scope_id: String, draft: T::Draft },
    Update { id: String, patch: T::Patch },
    Delete { id: String },
}

impl<T: Editable> MutationCommand<T> {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationCommand::Create { .. } => MutationKind::Create,
            MutationCommand::Update { .. } => MutationKind::Update,
            MutationCommand::Delete { .. } => MutationKind::Delete,
        }
    }
}
