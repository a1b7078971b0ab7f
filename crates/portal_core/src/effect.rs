use crate::{Editable, MutationCommand, Notification};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<T: Editable> {
    FetchCollection { scope_id: String },
    /// Re-issue the collection query for the current scope.
    RefetchCollection { scope_id: String },
    RunMutation(MutationCommand<T>),
    Notify(Notification),
}
