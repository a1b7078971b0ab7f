//! Action item categories of an organization.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::changed;
use crate::item::text_keys;
use crate::{Changeset, Editable, ListItem, ScreenMessages, SortKey, SortValue};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategorySearchField {
    Name,
    Description,
}

text_keys!(CategorySearchField {
    Name => "name",
    Description => "description",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryStatus {
    Active,
    Disabled,
}

text_keys!(CategoryStatus {
    Active => "active",
    Disabled => "disabled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategorySortField {
    CreatedAt,
}

text_keys!(CategorySortField {
    CreatedAt => "createdAt",
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
}

impl Changeset for CategoryPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_disabled.is_none()
    }
}

impl ListItem for Category {
    type SearchField = CategorySearchField;
    type Status = CategoryStatus;
    type SortField = CategorySortField;

    const DEFAULT_SEARCH_FIELDS: &'static [CategorySearchField] =
        &[CategorySearchField::Name, CategorySearchField::Description];
    const DEFAULT_SORT: SortKey<CategorySortField> = SortKey::desc(CategorySortField::CreatedAt);

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_texts(&self, field: CategorySearchField) -> Vec<&str> {
        match field {
            CategorySearchField::Name => vec![self.name.as_str()],
            CategorySearchField::Description => self.description.as_deref().into_iter().collect(),
        }
    }

    fn status(&self) -> CategoryStatus {
        if self.is_disabled {
            CategoryStatus::Disabled
        } else {
            CategoryStatus::Active
        }
    }

    fn sort_value(&self, field: CategorySortField) -> SortValue {
        match field {
            CategorySortField::CreatedAt => SortValue::Time(Some(self.created_at)),
        }
    }
}

impl Editable for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    const MESSAGES: ScreenMessages = ScreenMessages {
        created: "successfulCreation",
        updated: "successfulUpdation",
        deleted: "categoryDeleted",
        nothing_changed: "sameNameConflict",
    };

    fn draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            is_disabled: self.is_disabled,
        }
    }

    fn diff(&self, draft: &CategoryDraft) -> CategoryPatch {
        let current = self.draft();
        CategoryPatch {
            name: changed(&current.name, &draft.name),
            description: changed(&current.description, &draft.description),
            is_disabled: changed(&current.is_disabled, &draft.is_disabled),
        }
    }

    fn validate(draft: &CategoryDraft) -> Result<(), &'static str> {
        if draft.name.trim().is_empty() {
            return Err("nameRequired");
        }
        Ok(())
    }
}
