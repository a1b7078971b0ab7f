use chrono::{DateTime, Utc};
use portal_core::{Category, MutationCommand};
use serde::Deserialize;
use serde_json::Value;

use super::{decode, id_variables, input_variables, take_field, Resource};
use crate::{ApiError, GraphqlRequest};

const LIST_QUERY: &str = r#"
query ActionItemCategoriesByOrganization($input: QueryActionCategoriesByOrganizationInput!) {
  actionCategoriesByOrganization(input: $input) {
    id
    name
    description
    isDisabled
    createdAt
  }
}"#;

const CREATE_MUTATION: &str = r#"
mutation CreateActionItemCategory($input: MutationCreateActionItemCategoryInput!) {
  createActionItemCategory(input: $input) {
    id
  }
}"#;

const UPDATE_MUTATION: &str = r#"
mutation UpdateActionItemCategory($input: MutationUpdateActionItemCategoryInput!) {
  updateActionItemCategory(input: $input) {
    id
  }
}"#;

const DELETE_MUTATION: &str = r#"
mutation DeleteActionItemCategory($input: MutationDeleteActionItemCategoryInput!) {
  deleteActionItemCategory(input: $input) {
    id
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryNode {
    id: String,
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_disabled: bool,
    created_at: DateTime<Utc>,
}

/// Action item categories of one organization.
pub struct ActionItemCategories;

impl Resource for ActionItemCategories {
    type Item = Category;

    const NAME: &'static str = "action item categories";

    fn list_request(scope_id: &str) -> GraphqlRequest {
        GraphqlRequest {
            operation_name: "ActionItemCategoriesByOrganization",
            query: LIST_QUERY,
            variables: id_variables("organizationId", scope_id),
        }
    }

    fn decode_list(data: Value) -> Result<Vec<Category>, ApiError> {
        let nodes: Option<Vec<CategoryNode>> =
            decode(take_field(data, "actionCategoriesByOrganization"))?;
        Ok(nodes
            .unwrap_or_default()
            .into_iter()
            .map(|node| Category {
                id: node.id,
                name: node.name,
                description: node.description,
                is_disabled: node.is_disabled,
                created_at: node.created_at,
            })
            .collect())
    }

    fn mutation_request(command: &MutationCommand<Category>) -> GraphqlRequest {
        match command {
            MutationCommand::Create { scope_id, draft } => GraphqlRequest {
                operation_name: "CreateActionItemCategory",
                query: CREATE_MUTATION,
                variables: input_variables(draft, &[("organizationId", scope_id.as_str())]),
            },
            MutationCommand::Update { id, patch } => GraphqlRequest {
                operation_name: "UpdateActionItemCategory",
                query: UPDATE_MUTATION,
                variables: input_variables(patch, &[("id", id.as_str())]),
            },
            MutationCommand::Delete { id } => GraphqlRequest {
                operation_name: "DeleteActionItemCategory",
                query: DELETE_MUTATION,
                variables: id_variables("id", id),
            },
        }
    }
}
