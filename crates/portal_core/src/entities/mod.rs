mod action_item;
mod category;
mod pledge;

pub use action_item::{
    ActionItem, ActionItemDraft, ActionItemPatch, ActionItemSearchField, ActionItemSortField,
    ItemStatus,
};
pub use category::{
    Category, CategoryDraft, CategoryPatch, CategorySearchField, CategorySortField,
    CategoryStatus,
};
pub use pledge::{
    pledge_totals, Pledge, PledgeDraft, PledgePatch, PledgeSearchField, PledgeSortField,
    PledgeTotals,
};

/// Reference to a related record (user, category) by id and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRef {
    pub id: String,
    pub name: Option<String>,
}

/// Keeps `new` when it differs from `old`.
fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
    (old != new).then(|| new.clone())
}
