use chrono::{DateTime, Utc};
use portal_core::{MutationCommand, NamedRef, Pledge, ScopeHeader};
use portal_logging::portal_warn;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{decode, id_variables, input_variables, take_field, Resource};
use crate::{ApiError, GraphqlRequest};

const DEFAULT_CURRENCY: &str = "USD";

const LIST_QUERY: &str = r#"
query FundCampaignPledges($input: QueryFundCampaignInput!, $after: String) {
  fundCampaign(input: $input) {
    id
    name
    startAt
    endAt
    currencyCode
    goalAmount
    pledges(first: 32, after: $after) {
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          id
          amount
          createdAt
          pledger {
            id
            name
          }
        }
      }
    }
  }
}"#;

const CREATE_MUTATION: &str = r#"
mutation CreateFundCampaignPledge($input: MutationCreateFundCampaignPledgeInput!) {
  createFundCampaignPledge(input: $input) {
    id
  }
}"#;

const UPDATE_MUTATION: &str = r#"
mutation UpdateFundCampaignPledge($input: MutationUpdateFundCampaignPledgeInput!) {
  updateFundCampaignPledge(input: $input) {
    id
  }
}"#;

const DELETE_MUTATION: &str = r#"
mutation DeleteFundCampaignPledge($input: MutationDeleteFundCampaignPledgeInput!) {
  deleteFundCampaignPledge(input: $input) {
    id
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignNode {
    end_at: Option<DateTime<Utc>>,
    currency_code: Option<String>,
    pledges: Option<PledgeConnection>,
}

/// Campaign fields shown above the list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignHeaderNode {
    name: Option<String>,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    goal_amount: Option<f64>,
    currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PledgeConnection {
    #[serde(default)]
    edges: Vec<PledgeEdge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PledgeEdge {
    node: PledgeNode,
}

/// The API has served pledges in two shapes over time: with a list of
/// users, or with a single pledger.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PledgeNode {
    WithUsers(PledgeWithUsers),
    WithPledger(PledgeWithPledger),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PledgeWithUsers {
    id: String,
    amount: Option<f64>,
    created_at: DateTime<Utc>,
    users: Vec<Option<UserNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PledgeWithPledger {
    id: String,
    amount: Option<f64>,
    created_at: DateTime<Utc>,
    pledger: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    id: String,
    name: Option<String>,
}

impl PledgeNode {
    fn normalize(self, end_at: Option<DateTime<Utc>>, currency: &str) -> Pledge {
        let (id, amount, created_at, users) = match self {
            PledgeNode::WithUsers(node) => (
                node.id,
                node.amount,
                node.created_at,
                node.users.into_iter().flatten().collect::<Vec<_>>(),
            ),
            PledgeNode::WithPledger(node) => (
                node.id,
                node.amount,
                node.created_at,
                node.pledger.into_iter().collect(),
            ),
        };
        Pledge {
            id,
            amount: amount.unwrap_or(0.0),
            currency: currency.to_owned(),
            end_date: end_at.unwrap_or(created_at),
            users: users
                .into_iter()
                .map(|user| NamedRef {
                    id: user.id,
                    name: user.name,
                })
                .collect(),
            created_at,
        }
    }
}

/// Pledges of one fund campaign.
pub struct CampaignPledges;

impl Resource for CampaignPledges {
    type Item = Pledge;

    const NAME: &'static str = "campaign pledges";

    fn list_request(scope_id: &str) -> GraphqlRequest {
        GraphqlRequest {
            operation_name: "FundCampaignPledges",
            query: LIST_QUERY,
            variables: id_variables("id", scope_id),
        }
    }

    fn decode_list(data: Value) -> Result<Vec<Pledge>, ApiError> {
        let Some(campaign): Option<CampaignNode> = decode(take_field(data, "fundCampaign"))?
        else {
            return Ok(Vec::new());
        };
        let currency = campaign
            .currency_code
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY)
            .to_owned();
        let edges = campaign.pledges.map(|c| c.edges).unwrap_or_default();
        Ok(edges
            .into_iter()
            .map(|edge| edge.node.normalize(campaign.end_at, &currency))
            .collect())
    }

    fn next_page(scope_id: &str, data: &Value) -> Option<GraphqlRequest> {
        let page_info = data.pointer("/fundCampaign/pledges/pageInfo")?;
        let page_info: PageInfo = serde_json::from_value(page_info.clone()).ok()?;
        if !page_info.has_next_page {
            return None;
        }
        let Some(cursor) = page_info.end_cursor else {
            portal_warn!("Pledges of campaign={} report more pages without a cursor", scope_id);
            return None;
        };
        Some(GraphqlRequest {
            operation_name: "FundCampaignPledges",
            query: LIST_QUERY,
            variables: json!({ "input": { "id": scope_id }, "after": cursor }),
        })
    }

    fn decode_header(data: &Value) -> Option<ScopeHeader> {
        let campaign = data.get("fundCampaign").filter(|value| !value.is_null())?;
        match serde_json::from_value::<CampaignHeaderNode>(campaign.clone()) {
            Ok(node) => Some(ScopeHeader {
                name: node.name,
                start_at: node.start_at,
                end_at: node.end_at,
                goal: node.goal_amount,
                currency: node.currency_code,
            }),
            Err(err) => {
                portal_warn!("Ignoring campaign header: {}", err);
                None
            }
        }
    }

    fn mutation_request(command: &MutationCommand<Pledge>) -> GraphqlRequest {
        match command {
            MutationCommand::Create { scope_id, draft } => GraphqlRequest {
                operation_name: "CreateFundCampaignPledge",
                query: CREATE_MUTATION,
                variables: input_variables(draft, &[("campaignId", scope_id.as_str())]),
            },
            MutationCommand::Update { id, patch } => GraphqlRequest {
                operation_name: "UpdateFundCampaignPledge",
                query: UPDATE_MUTATION,
                variables: input_variables(patch, &[("id", id.as_str())]),
            },
            MutationCommand::Delete { id } => GraphqlRequest {
                operation_name: "DeleteFundCampaignPledge",
                query: DELETE_MUTATION,
                variables: id_variables("id", id),
            },
        }
    }
}
