//! Action items assigned within an organization.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{changed, NamedRef};
use crate::item::text_keys;
use crate::{Changeset, Editable, ListItem, ScreenMessages, SortKey, SortValue};

#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    pub id: String,
    pub assignee: Option<NamedRef>,
    pub category: Option<NamedRef>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub pre_completion_notes: String,
    pub post_completion_notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionItemSearchField {
    Assignee,
    Category,
}

text_keys!(ActionItemSearchField {
    Assignee => "assignee",
    Category => "category",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Pending,
    Completed,
}

text_keys!(ItemStatus {
    Pending => "pending",
    Completed => "completed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionItemSortField {
    AssignedAt,
    CreatedAt,
}

text_keys!(ActionItemSortField {
    AssignedAt => "assignedAt",
    CreatedAt => "createdAt",
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemDraft {
    pub assignee_id: Option<String>,
    pub category_id: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub pre_completion_notes: String,
    pub post_completion_notes: String,
    pub is_completed: bool,
}

/// Changed fields only. For the nullable fields the outer `Option` marks a
/// change and `Some(None)` clears the value, sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_completion_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_completion_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl Changeset for ActionItemPatch {
    fn is_empty(&self) -> bool {
        self == &ActionItemPatch::default()
    }
}

impl ListItem for ActionItem {
    type SearchField = ActionItemSearchField;
    type Status = ItemStatus;
    type SortField = ActionItemSortField;

    const DEFAULT_SEARCH_FIELDS: &'static [ActionItemSearchField] =
        &[ActionItemSearchField::Assignee];
    const DEFAULT_SORT: SortKey<ActionItemSortField> = SortKey::Unsorted;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_texts(&self, field: ActionItemSearchField) -> Vec<&str> {
        let related = match field {
            ActionItemSearchField::Assignee => &self.assignee,
            ActionItemSearchField::Category => &self.category,
        };
        related
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .into_iter()
            .collect()
    }

    fn status(&self) -> ItemStatus {
        if self.is_completed {
            ItemStatus::Completed
        } else {
            ItemStatus::Pending
        }
    }

    fn sort_value(&self, field: ActionItemSortField) -> SortValue {
        match field {
            ActionItemSortField::AssignedAt => SortValue::Time(self.assigned_at),
            ActionItemSortField::CreatedAt => SortValue::Time(Some(self.created_at)),
        }
    }
}

impl Editable for ActionItem {
    type Draft = ActionItemDraft;
    type Patch = ActionItemPatch;

    const MESSAGES: ScreenMessages = ScreenMessages {
        created: "successfulCreation",
        updated: "successfulUpdation",
        deleted: "successfulDeletion",
        nothing_changed: "noneUpdated",
    };

    fn draft(&self) -> ActionItemDraft {
        ActionItemDraft {
            assignee_id: self.assignee.as_ref().map(|r| r.id.clone()),
            category_id: self.category.as_ref().map(|r| r.id.clone()),
            assigned_at: self.assigned_at,
            pre_completion_notes: self.pre_completion_notes.clone(),
            post_completion_notes: self.post_completion_notes.clone(),
            is_completed: self.is_completed,
        }
    }

    fn diff(&self, draft: &ActionItemDraft) -> ActionItemPatch {
        let current = self.draft();
        ActionItemPatch {
            assignee_id: changed(&current.assignee_id, &draft.assignee_id),
            category_id: changed(&current.category_id, &draft.category_id),
            assigned_at: changed(&current.assigned_at, &draft.assigned_at),
            pre_completion_notes: changed(
                &current.pre_completion_notes,
                &draft.pre_completion_notes,
            ),
            post_completion_notes: changed(
                &current.post_completion_notes,
                &draft.post_completion_notes,
            ),
            is_completed: changed(&current.is_completed, &draft.is_completed),
        }
    }

    fn validate(draft: &ActionItemDraft) -> Result<(), &'static str> {
        if draft.category_id.is_none() {
            return Err("categoryRequired");
        }
        Ok(())
    }
}
