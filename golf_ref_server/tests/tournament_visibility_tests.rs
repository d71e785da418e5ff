mod common;

use std::collections::HashSet;

use golf_ref_entities::schema::tournament::TournamentStatus;
use golf_ref_server::tournament::{CreateTournamentRequest, TournamentInfo};
use sea_orm::prelude::Uuid;
use tracing_test::traced_test;

use crate::common::FixtureOptions;

async fn mock_fixture() -> common::Fixture {
    common::Fixture::new(FixtureOptions {
        mock_default_environment: true,
    }).await
}

fn ids(values: &[u128]) -> HashSet<Uuid> {
    values.iter().map(|v| Uuid::from_u128(*v)).collect()
}

async fn listed_ids(fixture: &mut common::Fixture) -> HashSet<Uuid> {
    let mut response = fixture.get("/api/tournaments").await;
    assert_eq!(response.status(), 200);
    let tournaments: Vec<TournamentInfo> = response.json().await;
    tournaments.into_iter().map(|t| t.uuid).collect()
}

fn create_request(uuid: u128, club: u128, tournament_type: u128) -> CreateTournamentRequest {
    CreateTournamentRequest {
        uuid: Uuid::from_u128(uuid),
        name: "Nuova gara".to_string(),
        club_id: Uuid::from_u128(club),
        tournament_type_id: Uuid::from_u128(tournament_type),
        status: TournamentStatus::Open,
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 5).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 6).unwrap(),
        availability_deadline: None,
    }
}

#[tokio::test]
#[traced_test]
async fn test_listing_requires_authentication() {
    let mut fixture = mock_fixture().await;
    let response = fixture.get("/api/tournaments").await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[traced_test]
async fn test_super_admin_sees_all_tournaments() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(900).await;
    assert_eq!(listed_ids(&mut fixture).await, ids(&[300, 301, 302, 303, 304]));
}

#[tokio::test]
#[traced_test]
async fn test_national_admin_list_is_national_only() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(901).await;
    assert_eq!(listed_ids(&mut fixture).await, ids(&[302]));
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_list_is_zone_scoped() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;
    assert_eq!(listed_ids(&mut fixture).await, ids(&[300, 303, 304]));
}

#[tokio::test]
#[traced_test]
async fn test_national_rank_referee_sees_zone_and_national() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(1002).await;
    assert_eq!(listed_ids(&mut fixture).await, ids(&[300, 302, 303, 304]));
}

#[tokio::test]
#[traced_test]
async fn test_show_agrees_with_list() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let listed = listed_ids(&mut fixture).await;
    for tournament in [300u128, 301, 302, 303, 304] {
        let response = fixture.get(&format!("/api/tournaments/{}", Uuid::from_u128(tournament))).await;
        let expected = if listed.contains(&Uuid::from_u128(tournament)) { 200 } else { 404 };
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[traced_test]
async fn test_invisible_and_missing_tournaments_are_indistinguishable() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    // 301 exists in another zone, 999 does not exist at all.
    let mut invisible = fixture.get(&format!("/api/tournaments/{}", Uuid::from_u128(301))).await;
    let mut missing = fixture.get(&format!("/api/tournaments/{}", Uuid::from_u128(999))).await;

    assert_eq!(invisible.status(), 404);
    assert_eq!(missing.status(), 404);

    let invisible_body: golf_ref_server::response::APIErrorResponse = invisible.json().await;
    let missing_body: golf_ref_server::response::APIErrorResponse = missing.json().await;
    assert_eq!(invisible_body.message, missing_body.message);
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_can_create_in_own_zone() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture
        .post_json("/api/tournaments", create_request(400, 100, 200))
        .await;
    assert_eq!(response.status(), 200);

    let response = fixture.get(&format!("/api/tournaments/{}", Uuid::from_u128(400))).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_can_not_create_in_foreign_zone() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    // Club 102 belongs to zone 11.
    let response = fixture
        .post_json("/api/tournaments", create_request(400, 102, 200))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_referee_can_not_create_tournaments() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(1002).await;

    let response = fixture
        .post_json("/api/tournaments", create_request(400, 100, 200))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_national_type_requires_national_administration() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture
        .post_json("/api/tournaments", create_request(400, 100, 202))
        .await;
    assert_eq!(response.status(), 403);

    fixture.login_as(901).await;
    let response = fixture
        .post_json("/api/tournaments", create_request(400, 100, 202))
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[traced_test]
async fn test_national_admin_can_not_create_zonal_tournaments() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(901).await;

    let response = fixture
        .post_json("/api/tournaments", create_request(400, 100, 200))
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_completed_status_is_not_a_valid_initial_status() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let mut request = create_request(400, 100, 200);
    request.status = TournamentStatus::Completed;
    let response = fixture.post_json("/api/tournaments", request).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_zone_admin_can_delete_own_tournament() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(910).await;

    let response = fixture.delete(&format!("/api/tournaments/{}", Uuid::from_u128(304))).await;
    assert_eq!(response.status(), 200);

    let response = fixture.get(&format!("/api/tournaments/{}", Uuid::from_u128(304))).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_referee_can_not_delete_tournaments() {
    let mut fixture = mock_fixture().await;
    fixture.login_as(1000).await;

    let response = fixture.delete(&format!("/api/tournaments/{}", Uuid::from_u128(304))).await;
    assert_eq!(response.status(), 403);
}
