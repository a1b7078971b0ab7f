//! GraphQL documents and response normalization, one module per entity.
mod action_items;
mod categories;
mod pledges;

pub use action_items::ActionItems;
pub use categories::ActionItemCategories;
pub use pledges::CampaignPledges;

use portal_core::{Editable, MutationCommand, ScopeHeader};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{ApiError, FailureKind, GraphqlRequest};

/// A collection the API serves for one scope (organization, campaign), with
/// its create / update / delete operations.
pub trait Resource: Send + Sync + 'static {
    type Item: Editable;

    /// Name used in logs.
    const NAME: &'static str;

    fn list_request(scope_id: &str) -> GraphqlRequest;

    /// Normalizes the list query's `data` into records.
    fn decode_list(data: Value) -> Result<Vec<Self::Item>, ApiError>;

    /// Request for the page after `data`, when the response reports one.
    /// Unpaged lists arrive whole.
    fn next_page(_scope_id: &str, _data: &Value) -> Option<GraphqlRequest> {
        None
    }

    /// Scope details carried in the list response.
    fn decode_header(_data: &Value) -> Option<ScopeHeader> {
        None
    }

    fn mutation_request(command: &MutationCommand<Self::Item>) -> GraphqlRequest;
}

/// Removes `field` from a `data` object. A missing or null field is `Null`.
fn take_field(data: Value, field: &str) -> Value {
    match data {
        Value::Object(mut object) => object.remove(field).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

/// Wraps serialized `fields` plus `extra` entries as `{ "input": { ... } }`.
fn input_variables(fields: &impl Serialize, extra: &[(&str, &str)]) -> Value {
    let mut input = match serde_json::to_value(fields) {
        Ok(Value::Object(object)) => object,
        _ => Map::new(),
    };
    for (key, value) in extra {
        input.insert((*key).to_owned(), Value::String((*value).to_owned()));
    }
    let mut variables = Map::new();
    variables.insert("input".to_owned(), Value::Object(input));
    Value::Object(variables)
}

/// `{ "input": { "<key>": "<value>" } }`
fn id_variables(key: &str, value: &str) -> Value {
    input_variables(&Map::new(), &[(key, value)])
}
