use std::sync::Arc;

use chrono::{TimeZone, Utc};
use portal_engine::{
    ActionItemCategories, CampaignPledges, FailureKind, RemoteCollection, ReqwestTransport, Transport,
    TransportSettings,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> Arc<dyn Transport> {
    let settings = TransportSettings {
        endpoint: format!("{}/graphql", server.uri()),
        ..TransportSettings::default()
    };
    Arc::new(ReqwestTransport::new(settings).expect("transport"))
}

fn category_list() -> serde_json::Value {
    json!({
        "data": {
            "actionCategoriesByOrganization": [
                {
                    "id": "1",
                    "name": "Category 1",
                    "description": "First",
                    "isDisabled": false,
                    "createdAt": "2024-08-30T12:00:00Z"
                },
                {
                    "id": "2",
                    "name": "Category 2",
                    "description": null,
                    "isDisabled": true,
                    "createdAt": "2024-08-29T12:00:00Z"
                }
            ]
        }
    })
}

#[tokio::test]
async fn fetch_loads_full_collection_for_scope() {
    portal_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "input": { "organizationId": "org-1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_list()))
        .mount(&server)
        .await;

    let collection = RemoteCollection::<ActionItemCategories>::new(transport_for(&server), "org-1");
    let items = collection.fetch().await.expect("fetch ok");

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Category 2");
    assert_eq!(items[1].description, None);
    assert!(items[1].is_disabled);

    let snapshot = collection.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.data.map(|data| data.len()), Some(2));
}

#[tokio::test]
async fn empty_collection_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "actionCategoriesByOrganization": [] } })),
        )
        .mount(&server)
        .await;

    let collection = RemoteCollection::<ActionItemCategories>::new(transport_for(&server), "org-1");
    let items = collection.fetch().await.expect("fetch ok");
    assert!(items.is_empty());
    assert!(collection.snapshot().error.is_none());
}

#[tokio::test]
async fn failure_sets_error_and_clears_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_list()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Mock Graphql Error" }]
        })))
        .mount(&server)
        .await;

    let collection = RemoteCollection::<ActionItemCategories>::new(transport_for(&server), "org-1");
    collection.fetch().await.expect("first fetch ok");

    let err = collection.refetch().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::GraphQl);

    let snapshot = collection.snapshot();
    assert!(snapshot.data.is_none());
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error.map(|err| err.message),
        Some("Mock Graphql Error".to_string())
    );
}

#[tokio::test]
async fn refetch_reissues_the_same_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ActionItemCategoriesByOrganization",
            "variables": { "input": { "organizationId": "org-1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_list()))
        .expect(2)
        .mount(&server)
        .await;

    let collection = RemoteCollection::<ActionItemCategories>::new(transport_for(&server), "org-1");
    let first = collection.fetch().await.expect("fetch ok");
    let second = collection.refetch().await.expect("refetch ok");
    assert_eq!(first, second);
    assert!(!Arc::ptr_eq(&first, &second));
}

fn pledge_page(ids: &[&str], has_next_page: bool, end_cursor: Option<&str>) -> serde_json::Value {
    let edges: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "node": {
                    "id": id,
                    "amount": 100,
                    "createdAt": "2024-08-30T12:00:00Z",
                    "pledger": { "id": "user-1", "name": "John Doe" }
                }
            })
        })
        .collect();
    json!({
        "data": {
            "fundCampaign": {
                "id": "campaign-1",
                "name": "Spring drive",
                "startAt": "2024-06-01T00:00:00Z",
                "endAt": "2024-12-31T00:00:00Z",
                "currencyCode": "USD",
                "goalAmount": 5000,
                "pledges": {
                    "edges": edges,
                    "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
                }
            }
        }
    })
}

#[tokio::test]
async fn fetch_follows_pledge_pages_until_the_last() {
    portal_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "FundCampaignPledges",
            "variables": { "after": "cursor-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(pledge_page(&["3"], false, None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "FundCampaignPledges",
            "variables": { "input": { "id": "campaign-1" } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(pledge_page(&["1", "2"], true, Some("cursor-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collection = RemoteCollection::<CampaignPledges>::new(transport_for(&server), "campaign-1");
    let pledges = collection.fetch().await.expect("fetch ok");

    let ids: Vec<&str> = pledges.iter().map(|pledge| pledge.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let header = collection.header().expect("campaign header");
    assert_eq!(header.goal, Some(5000.0));
    assert_eq!(header.start_at, Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
}

#[tokio::test]
async fn failing_second_page_fails_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Mock Graphql Error" }]
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(pledge_page(&["1"], true, Some("cursor-1"))),
        )
        .mount(&server)
        .await;

    let collection = RemoteCollection::<CampaignPledges>::new(transport_for(&server), "campaign-1");
    let err = collection.fetch().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::GraphQl);
    let snapshot = collection.snapshot();
    assert!(snapshot.data.is_none());
    assert!(snapshot.header.is_none());
}
