mod common;

use golf_ref_entities::schema;
use golf_ref_server::assignment::{CreateAssignmentRequest, CreateAssignmentResponse};
use golf_ref_server::response::APIErrorResponse;
use sea_orm::prelude::Uuid;
use tracing_test::traced_test;

use crate::common::FixtureOptions;

async fn mock_fixture() -> common::Fixture {
    common::Fixture::new(FixtureOptions {
        mock_default_environment: true,
    }).await
}

fn assign(referee: u128, role: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        referee_id: Uuid::from_u128(referee),
        role: role.to_string(),
    }
}

fn assignments_path(tournament: u128) -> String {
    format!("/api/tournaments/{}/assignments", Uuid::from_u128(tournament))
}

async fn expect_refusal(response: &mut common::APIResponse, status: u16, reason: &str) {
    assert_eq!(response.status(), status);
    let body: APIErrorResponse = response.json().await;
    assert_eq!(body.reason.as_deref(), Some(reason));
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_can_assign_referee() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_duplicate_assignment_is_refused() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Osservatore"))
        .await;
    expect_refusal(&mut response, 400, "already_assigned").await;
}

#[tokio::test]
#[traced_test]
async fn test_capacity_is_enforced() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    // Tournament 300 takes at most two referees.
    let response = fixture
        .post_json(&assignments_path(300), assign(1000, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
    let response = fixture
        .post_json(&assignments_path(300), assign(1001, "Direttore di Torneo"))
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1002, "Osservatore"))
        .await;
    expect_refusal(&mut response, 400, "capacity_exceeded").await;
}

#[tokio::test]
#[traced_test]
async fn test_level_below_requirement_is_refused() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(901).await;

    // The national open requires Nazionale, referee 1000 is Aspirante.
    let mut response = fixture
        .post_json(&assignments_path(302), assign(1000, "Arbitro"))
        .await;
    expect_refusal(&mut response, 400, "level_too_low").await;
}

#[tokio::test]
#[traced_test]
async fn test_foreign_zone_admin_is_forbidden() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(911).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    expect_refusal(&mut response, 403, "forbidden").await;
}

#[tokio::test]
#[traced_test]
async fn test_inactive_referee_is_refused() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(911).await;

    let mut response = fixture
        .post_json(&assignments_path(301), assign(1004, "Arbitro"))
        .await;
    expect_refusal(&mut response, 400, "inactive_referee").await;
}

#[tokio::test]
#[traced_test]
async fn test_unknown_role_is_refused() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Caddy"))
        .await;
    expect_refusal(&mut response, 400, "invalid_role").await;
}

#[tokio::test]
#[traced_test]
async fn test_draft_tournament_refuses_assignments() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(303), assign(1001, "Arbitro"))
        .await;
    expect_refusal(&mut response, 400, "tournament_not_accepting_assignments").await;
}

#[tokio::test]
#[traced_test]
async fn test_cross_zone_referee_is_refused_for_zonal_tournament() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(900).await;

    // Referee 1003 belongs to zone 11, tournament 300 to zone 10.
    let mut response = fixture
        .post_json(&assignments_path(300), assign(1003, "Arbitro"))
        .await;
    expect_refusal(&mut response, 400, "zone_mismatch").await;
}

#[tokio::test]
#[traced_test]
async fn test_admin_can_not_be_assigned() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(910, "Arbitro"))
        .await;
    expect_refusal(&mut response, 400, "invalid_referee").await;
}

#[tokio::test]
#[traced_test]
async fn test_assignment_listing_follows_tournament_visibility() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get(&assignments_path(300)).await;
    assert_eq!(response.status(), 200);
    let assignments: Vec<schema::assignment::Model> = response.json().await;
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].user_id, Uuid::from_u128(1001));

    // The other zone's admin can not even see the tournament.
    fixture.login_as(911).await;
    let response = fixture.get(&assignments_path(300)).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_referee_confirms_own_assignment() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
    let assignment: CreateAssignmentResponse = response.json().await;

    fixture.login_as(1001).await;
    let mut response = fixture
        .post_json_no_body(&format!("/api/assignments/{}/confirm", assignment.uuid))
        .await;
    assert_eq!(response.status(), 200);
    let confirmed: schema::assignment::Model = response.json().await;
    assert!(confirmed.is_confirmed);
}

#[tokio::test]
#[traced_test]
async fn test_other_referee_can_not_confirm() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
    let assignment: CreateAssignmentResponse = response.json().await;

    fixture.login_as(1002).await;
    let response = fixture
        .post_json_no_body(&format!("/api/assignments/{}/confirm", assignment.uuid))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_can_remove_assignment() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
    let assignment: CreateAssignmentResponse = response.json().await;

    let response = fixture.delete(&format!("/api/assignments/{}", assignment.uuid)).await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get(&assignments_path(300)).await;
    let assignments: Vec<schema::assignment::Model> = response.json().await;
    assert!(assignments.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_foreign_zone_admin_can_not_remove_assignment() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut response = fixture
        .post_json(&assignments_path(300), assign(1001, "Arbitro"))
        .await;
    assert_eq!(response.status(), 200);
    let assignment: CreateAssignmentResponse = response.json().await;

    fixture.login_as(911).await;
    let response = fixture.delete(&format!("/api/assignments/{}", assignment.uuid)).await;
    assert_eq!(response.status(), 404);
}
