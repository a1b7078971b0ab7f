//! Portal core: pure list-screen state machine and view-model helpers.
mod command;
mod effect;
mod entities;
mod filter;
mod item;
mod msg;
mod notification;
mod scope;
mod session;
mod sort;
mod state;
mod update;
mod view_model;

pub use command::{Changeset, Editable, MutationCommand, MutationKind, ScreenMessages};
pub use effect::Effect;
pub use entities::{
    pledge_totals, ActionItem, ActionItemDraft, ActionItemPatch, ActionItemSearchField,
    ActionItemSortField, Category, CategoryDraft, CategoryPatch, CategorySearchField,
    CategorySortField, CategoryStatus, ItemStatus, NamedRef, Pledge, PledgeDraft, PledgePatch,
    PledgeSearchField, PledgeSortField, PledgeTotals,
};
pub use filter::{matches, FilterState};
pub use item::{ListItem, ParseKeyError, SortValue};
pub use msg::Msg;
pub use notification::{Notification, NotificationLevel, NotificationText};
pub use scope::ScopeHeader;
pub use session::{Session, SessionContext};
pub use sort::{compare, sort_rows, SortDirection, SortKey};
pub use state::{ListScreen, Modal};
pub use update::update;
pub use view_model::{project, ListStatus, ListViewModel, ModalView, Projection, ViewRow};
