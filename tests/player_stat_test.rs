use reqwest::{Client, Method};
use serde_json::{json, Value};

mod common;
use common::utils::{
    create_admin_user_and_login, create_match, create_player, create_team, make_authenticated_request,
    spawn_app, TestApp, TestUser,
};

struct Fixture {
    player_id: i64,
    match_id: i64,
}

async fn fixture(app: &TestApp, user: &TestUser) -> Fixture {
    let home = create_team(app, &user.token, json!({ "name": "Dortmund" })).await;
    let away = create_team(app, &user.token, json!({ "name": "Bayern" })).await;
    let player_id = create_player(app, &user.token, json!({ "name": "Marco Reus", "team_id": home })).await;
    let match_id = create_match(app, &user.token, home, away, "2024-03-30").await;
    Fixture { player_id, match_id }
}

async fn post_stat(app: &TestApp, user: &TestUser, body: Value) -> reqwest::Response {
    make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/stats/", app.address),
        &user.token,
        Some(body),
    )
    .await
}

#[tokio::test]
async fn stat_counters_default_to_zero() {
    let test_app = spawn_app().await;
    let user = create_admin_user_and_login(&test_app).await;
    let f = fixture(&test_app, &user).await;

    let response = post_stat(
        &test_app,
        &user,
        json!({ "player_id": f.player_id, "match_id": f.match_id, "goals": 1, "minutes_played": 90 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);

    let stat: Value = response.json().await.unwrap();
    assert_eq!(stat["goals"], 1);
    assert_eq!(stat["assists"], 0);
    assert_eq!(stat["rating"], Value::Null);
}

#[tokio::test]
async fn stat_for_unknown_player_is_rejected() {
    let test_app = spawn_app().await;
    let user = create_admin_user_and_login(&test_app).await;
    let f = fixture(&test_app, &user).await;

    let response = post_stat(&test_app, &user, json!({ "player_id": 777777, "match_id": f.match_id })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn impossible_stats_are_rejected() {
    let test_app = spawn_app().await;
    let user = create_admin_user_and_login(&test_app).await;
    let f = fixture(&test_app, &user).await;

    let response = post_stat(
        &test_app,
        &user,
        json!({ "player_id": f.player_id, "match_id": f.match_id, "shots": 2, "shots_on_target": 3 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = post_stat(
        &test_app,
        &user,
        json!({ "player_id": f.player_id, "match_id": f.match_id, "rating": 11.5 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn stats_are_listed_per_player_and_match() {
    let test_app = spawn_app().await;
    let user = create_admin_user_and_login(&test_app).await;
    let f = fixture(&test_app, &user).await;
    post_stat(&test_app, &user, json!({ "player_id": f.player_id, "match_id": f.match_id, "goals": 2 })).await;
    let client = Client::new();

    let by_player: Value = client
        .get(format!("{}/players/{}/stats", test_app.address, f.player_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_player.as_array().unwrap().len(), 1);
    assert_eq!(by_player[0]["goals"], 2);

    let by_match: Value = client
        .get(format!("{}/matches/{}/stats", test_app.address, f.match_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_match[0]["player_id"], f.player_id);

    let response = client
        .get(format!("{}/players/999999/stats", test_app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn stat_update_is_validated_against_merged_row() {
    let test_app = spawn_app().await;
    let user = create_admin_user_and_login(&test_app).await;
    let f = fixture(&test_app, &user).await;
    let response = post_stat(
        &test_app,
        &user,
        json!({ "player_id": f.player_id, "match_id": f.match_id, "shots": 4, "shots_on_target": 2 }),
    )
    .await;
    let stat: Value = response.json().await.unwrap();
    let url = format!("{}/stats/{}", test_app.address, stat["id"]);
    let client = Client::new();

    let response = make_authenticated_request(&client, Method::PATCH, &url, &user.token, Some(json!({ "shots": 1 }))).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = make_authenticated_request(&client, Method::PATCH, &url, &user.token, Some(json!({ "shots": 5 }))).await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["shots"], 5);
    assert_eq!(updated["shots_on_target"], 2);

    let response = make_authenticated_request(&client, Method::DELETE, &url, &user.token, None).await;
    assert_eq!(response.status().as_u16(), 204);
    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
