use reqwest::{Client, Method};
use serde_json::{json, Value};

mod common;
use common::utils::{
    create_admin_user_and_login, create_match, create_team, create_test_user_and_login,
    make_authenticated_request, spawn_app,
};

#[tokio::test]
async fn new_match_defaults_to_scheduled() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let home = create_team(&test_app, &user.token, json!({ "name": "Roma" })).await;
    let away = create_team(&test_app, &user.token, json!({ "name": "Lazio" })).await;
    let match_id = create_match(&test_app, &user.token, home, away, "2024-04-06").await;

    let fixture: Value = Client::new()
        .get(format!("{}/matches/{}", test_app.address, match_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fixture["status"], "SCHEDULED");
    assert_eq!(fixture["match_date"], "2024-04-06");
    assert_eq!(fixture["home_goals"], Value::Null);
}

#[tokio::test]
async fn match_with_unknown_team_is_rejected() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let home = create_team(&test_app, &user.token, json!({ "name": "Napoli" })).await;

    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/matches/", test_app.address),
        &user.token,
        Some(json!({ "home_team_id": home, "away_team_id": 987654, "match_date": "2024-04-06" })),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let home = create_team(&test_app, &user.token, json!({ "name": "Torino" })).await;
    let away = create_team(&test_app, &user.token, json!({ "name": "Juventus" })).await;

    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/matches/", test_app.address),
        &user.token,
        Some(json!({
            "home_team_id": home,
            "away_team_id": away,
            "match_date": "2024-04-06",
            "status": "ABANDONED"
        })),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn recording_a_result() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let home = create_team(&test_app, &user.token, json!({ "name": "Inter" })).await;
    let away = create_team(&test_app, &user.token, json!({ "name": "Milan" })).await;
    let match_id = create_match(&test_app, &user.token, home, away, "2024-04-22").await;

    let response = make_authenticated_request(
        &Client::new(),
        Method::PATCH,
        &format!("{}/matches/{}", test_app.address, match_id),
        &user.token,
        Some(json!({ "home_goals": 2, "away_goals": 1, "status": "FINISHED" })),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let fixture: Value = response.json().await.unwrap();
    assert_eq!(fixture["home_goals"], 2);
    assert_eq!(fixture["away_goals"], 1);
    assert_eq!(fixture["status"], "FINISHED");
    assert_eq!(fixture["match_date"], "2024-04-22");
}

#[tokio::test]
async fn matches_filter_by_team_and_status() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let a = create_team(&test_app, &user.token, json!({ "name": "Ajax" })).await;
    let b = create_team(&test_app, &user.token, json!({ "name": "PSV" })).await;
    let c = create_team(&test_app, &user.token, json!({ "name": "Feyenoord" })).await;
    create_match(&test_app, &user.token, a, b, "2024-01-01").await;
    create_match(&test_app, &user.token, c, a, "2024-02-01").await;
    create_match(&test_app, &user.token, b, c, "2024-03-01").await;
    let client = Client::new();

    let involving_a: Value = client
        .get(format!("{}/matches/?team_id={}", test_app.address, a))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let dates: Vec<&str> = involving_a
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["match_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-02-01", "2024-01-01"]);

    let finished: Value = client
        .get(format!("{}/matches/?status=FINISHED", test_app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(finished.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_match_needs_admin() {
    let test_app = spawn_app().await;
    let user = create_test_user_and_login(&test_app).await;
    let admin = create_admin_user_and_login(&test_app).await;
    let home = create_team(&test_app, &user.token, json!({ "name": "Celtic" })).await;
    let away = create_team(&test_app, &user.token, json!({ "name": "Rangers" })).await;
    let match_id = create_match(&test_app, &user.token, home, away, "2024-05-11").await;
    let client = Client::new();
    let url = format!("{}/matches/{}", test_app.address, match_id);

    let response = make_authenticated_request(&client, Method::DELETE, &url, &user.token, None).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = make_authenticated_request(&client, Method::DELETE, &url, &admin.token, None).await;
    assert_eq!(response.status().as_u16(), 204);

    // With the match gone the teams can be removed again
    let response = make_authenticated_request(
        &client,
        Method::DELETE,
        &format!("{}/teams/{}", test_app.address, home),
        &admin.token,
        None,
    )
    .await;
    assert_eq!(response.status().as_u16(), 204);
}
