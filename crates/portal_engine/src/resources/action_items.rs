use chrono::{DateTime, Utc};
use portal_core::{ActionItem, MutationCommand, NamedRef};
use serde::Deserialize;
use serde_json::Value;

use super::{decode, id_variables, input_variables, take_field, Resource};
use crate::{ApiError, GraphqlRequest};

const LIST_QUERY: &str = r#"
query ActionItemsByOrganization($input: QueryActionItemsByOrganizationInput!) {
  actionItemsByOrganization(input: $input) {
    id
    isCompleted
    assignedAt
    createdAt
    preCompletionNotes
    postCompletionNotes
    assignee {
      id
      name
    }
    category {
      id
      name
    }
  }
}"#;

const CREATE_MUTATION: &str = r#"
mutation CreateActionItem($input: MutationCreateActionItemInput!) {
  createActionItem(input: $input) {
    id
  }
}"#;

const UPDATE_MUTATION: &str = r#"
mutation UpdateActionItem($input: MutationUpdateActionItemInput!) {
  updateActionItem(input: $input) {
    id
  }
}"#;

const DELETE_MUTATION: &str = r#"
mutation DeleteActionItem($input: MutationDeleteActionItemInput!) {
  deleteActionItem(input: $input) {
    id
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionItemNode {
    id: String,
    #[serde(default)]
    is_completed: bool,
    assigned_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    pre_completion_notes: Option<String>,
    post_completion_notes: Option<String>,
    assignee: Option<RefNode>,
    category: Option<RefNode>,
}

#[derive(Debug, Deserialize)]
struct RefNode {
    id: String,
    name: Option<String>,
}

impl From<RefNode> for NamedRef {
    fn from(node: RefNode) -> Self {
        NamedRef {
            id: node.id,
            name: node.name,
        }
    }
}

/// Action items of one organization.
pub struct ActionItems;

impl Resource for ActionItems {
    type Item = ActionItem;

    const NAME: &'static str = "action items";

    fn list_request(scope_id: &str) -> GraphqlRequest {
        GraphqlRequest {
            operation_name: "ActionItemsByOrganization",
            query: LIST_QUERY,
            variables: id_variables("organizationId", scope_id),
        }
    }

    fn decode_list(data: Value) -> Result<Vec<ActionItem>, ApiError> {
        let nodes: Option<Vec<ActionItemNode>> =
            decode(take_field(data, "actionItemsByOrganization"))?;
        Ok(nodes
            .unwrap_or_default()
            .into_iter()
            .map(|node| ActionItem {
                id: node.id,
                assignee: node.assignee.map(NamedRef::from),
                category: node.category.map(NamedRef::from),
                assigned_at: node.assigned_at,
                is_completed: node.is_completed,
                pre_completion_notes: node.pre_completion_notes.unwrap_or_default(),
                post_completion_notes: node.post_completion_notes.unwrap_or_default(),
                created_at: node.created_at,
            })
            .collect())
    }

    fn mutation_request(command: &MutationCommand<ActionItem>) -> GraphqlRequest {
        match command {
            MutationCommand::Create { scope_id, draft } => GraphqlRequest {
                operation_name: "CreateActionItem",
                query: CREATE_MUTATION,
                variables: input_variables(draft, &[("organizationId", scope_id.as_str())]),
            },
            MutationCommand::Update { id, patch } => GraphqlRequest {
                operation_name: "UpdateActionItem",
                query: UPDATE_MUTATION,
                variables: input_variables(patch, &[("id", id.as_str())]),
            },
            MutationCommand::Delete { id } => GraphqlRequest {
                operation_name: "DeleteActionItem",
                query: DELETE_MUTATION,
                variables: id_variables("id", id),
            },
        }
    }
}
