use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use portal_app::platform::app::ListSession;
use portal_core::{
    CategoryDraft, ListStatus, Modal, Msg, Notification, NotificationLevel, NotificationText,
    PledgeDraft,
};
use portal_engine::{
    ActionItemCategories, CampaignPledges, ReqwestTransport, Transport, TransportSettings,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(10);

fn list_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "actionCategoriesByOrganization": [
                {
                    "id": "1",
                    "name": "Category 1",
                    "description": null,
                    "isDisabled": false,
                    "createdAt": "2024-08-30T12:00:00Z"
                },
                {
                    "id": "2",
                    "name": "Category 2",
                    "description": "Fundraising",
                    "isDisabled": true,
                    "createdAt": "2024-08-29T12:00:00Z"
                }
            ]
        }
    }))
}

/// Starts a mock API on its own runtime. The runtime must outlive the test
/// body, so it is returned alongside the server.
fn mock_api(mutation: &str, response: ResponseTemplate) -> (tokio::runtime::Runtime, MockServer) {
    portal_logging::initialize_for_tests();
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "ActionItemCategoriesByOrganization"
            })))
            .respond_with(list_response())
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": mutation })))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    });
    (runtime, server)
}

fn transport_for(server: &MockServer) -> Arc<dyn Transport> {
    let settings = TransportSettings {
        endpoint: format!("{}/graphql", server.uri()),
        ..TransportSettings::default()
    };
    Arc::new(ReqwestTransport::new(settings).expect("transport"))
}

fn session_for(server: &MockServer) -> ListSession<ActionItemCategories> {
    ListSession::new(transport_for(server), TIMEOUT)
}

#[test]
fn open_loads_and_projects_collection() {
    let (_runtime, server) = mock_api("Unused", ResponseTemplate::new(500));
    let mut screen = session_for(&server);

    screen.open("org-1").expect("settled");

    let view = screen.view();
    assert_eq!(view.status, ListStatus::Ready);
    assert_eq!(view.total_count, 2);
    assert_eq!(view.rows[0].serial_number, 1);
    assert_eq!(view.rows[0].item.name, "Category 1");
    assert!(screen.take_notifications().is_empty());
}

#[test]
fn delete_success_refetches_and_notifies() {
    let (runtime, server) = mock_api(
        "DeleteActionItemCategory",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": { "deleteActionItemCategory": { "id": "1" } }
        })),
    );
    let mut screen = session_for(&server);
    screen.open("org-1").expect("settled");

    screen.dispatch(Msg::DeleteClicked { id: "1".to_string() });
    screen.dispatch(Msg::DeleteConfirmed);
    assert!(screen.view().submitting);
    screen.settle().expect("settled");

    assert_eq!(
        screen.take_notifications(),
        vec![Notification::success("categoryDeleted")]
    );
    assert!(screen.state().modal().is_none());
    assert!(!screen.view().submitting);
    assert_eq!(screen.view().status, ListStatus::Ready);

    let lists = server_requests(&runtime, &server, "ActionItemCategoriesByOrganization");
    assert_eq!(lists, 2);
}

#[test]
fn delete_failure_keeps_modal_and_shows_upstream_message() {
    let (runtime, server) = mock_api(
        "DeleteActionItemCategory",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Error deleting category" }]
        })),
    );
    let mut screen = session_for(&server);
    screen.open("org-1").expect("settled");

    screen.dispatch(Msg::DeleteClicked { id: "2".to_string() });
    screen.dispatch(Msg::DeleteConfirmed);
    screen.settle().expect("settled");

    let notifications = screen.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(
        notifications[0].text,
        NotificationText::Literal("Error deleting category".to_string())
    );
    assert!(matches!(screen.state().modal(), Some(Modal::Delete(item)) if item.id == "2"));
    assert_eq!(server_requests(&runtime, &server, "ActionItemCategoriesByOrganization"), 1);
}

#[test]
fn invalid_create_never_reaches_the_api() {
    let (runtime, server) = mock_api("CreateActionItemCategory", ResponseTemplate::new(500));
    let mut screen = session_for(&server);
    screen.open("org-1").expect("settled");

    screen.dispatch(Msg::CreateClicked { at: Utc::now() });
    screen.dispatch(Msg::FormSubmitted(CategoryDraft::default()));
    screen.settle().expect("settled");

    assert_eq!(
        screen.take_notifications(),
        vec![Notification::warning("nameRequired")]
    );
    assert_eq!(server_requests(&runtime, &server, "CreateActionItemCategory"), 0);
}

fn server_requests(
    runtime: &tokio::runtime::Runtime,
    server: &MockServer,
    operation: &str,
) -> usize {
    let requests = runtime
        .block_on(server.received_requests())
        .unwrap_or_default();
    requests
        .iter()
        .filter(|request| {
            serde_json::from_slice::<serde_json::Value>(&request.body)
                .map(|body| body["operationName"] == operation)
                .unwrap_or(false)
        })
        .count()
}

#[test]
fn ended_campaign_refuses_new_pledges_before_any_call() {
    portal_logging::initialize_for_tests();
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "FundCampaignPledges" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "fundCampaign": {
                        "id": "campaign-1",
                        "name": "Spring drive",
                        "startAt": "2020-01-01T00:00:00Z",
                        "endAt": "2020-12-31T00:00:00Z",
                        "currencyCode": "USD",
                        "goalAmount": 1000,
                        "pledges": {
                            "edges": [],
                            "pageInfo": { "hasNextPage": false, "endCursor": null }
                        }
                    }
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "CreateFundCampaignPledge" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "createFundCampaignPledge": { "id": "pledge-1" } }
            })))
            .mount(&server)
            .await;
        server
    });
    let mut screen = ListSession::<CampaignPledges>::new(transport_for(&server), TIMEOUT);
    screen.open("campaign-1").expect("settled");

    assert_eq!(screen.view().status, ListStatus::Ready);
    let header = screen.state().header().expect("campaign header");
    assert_eq!(header.goal, Some(1000.0));

    screen.dispatch(Msg::CreateClicked { at: Utc::now() });
    screen.dispatch(Msg::FormSubmitted(PledgeDraft {
        amount: 100.0,
        pledger_id: Some("user-1".to_string()),
    }));
    screen.settle().expect("settled");

    assert_eq!(
        screen.take_notifications(),
        vec![Notification::warning("campaignNotActive")]
    );
    assert_eq!(server_requests(&runtime, &server, "CreateFundCampaignPledge"), 0);
}
