use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};

use footballiq_backend::run;
use footballiq_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use footballiq_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub struct TestUser {
    pub username: String,
    pub password: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Every test gets its own database
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);

    let server = run(listener, connection_pool.clone(), jwt_settings)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn register_user(app: &TestApp, username: &str, email: &str, password: &str) -> Response {
    Client::new()
        .post(format!("{}/auth/register", app.address))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute register request.")
}

pub async fn login(app: &TestApp, username: &str, password: &str) -> Response {
    Client::new()
        .post(format!("{}/auth/token", app.address))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to execute login request.")
}

pub async fn create_test_user_and_login(app: &TestApp) -> TestUser {
    let username = format!("fan{}", &Uuid::new_v4().simple().to_string()[..12]);
    let password = "password123".to_string();
    let email = format!("{}@example.com", username);

    let response = register_user(app, &username, &email, &password).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = login(app, &username, &password).await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["access_token"].as_str().expect("No token in response").to_string();

    TestUser { username, password, token }
}

/// A logged-in user with the admin flag set directly in the database.
pub async fn create_admin_user_and_login(app: &TestApp) -> TestUser {
    let user = create_test_user_and_login(app).await;
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE username = $1")
        .bind(&user.username)
        .execute(&app.db_pool)
        .await
        .expect("Failed to promote user to admin");
    user
}

pub async fn make_authenticated_request(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

/// Create a team through the API and return its id.
pub async fn create_team(app: &TestApp, token: &str, body: Value) -> i64 {
    let response = make_authenticated_request(
        &Client::new(),
        reqwest::Method::POST,
        &format!("{}/teams/", app.address),
        token,
        Some(body),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    let team: Value = response.json().await.expect("Failed to parse team");
    team["id"].as_i64().expect("Team has no id")
}

pub async fn create_player(app: &TestApp, token: &str, body: Value) -> i64 {
    let response = make_authenticated_request(
        &Client::new(),
        reqwest::Method::POST,
        &format!("{}/players/", app.address),
        token,
        Some(body),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    let player: Value = response.json().await.expect("Failed to parse player");
    player["id"].as_i64().expect("Player has no id")
}

pub async fn create_match(app: &TestApp, token: &str, home_team_id: i64, away_team_id: i64, date: &str) -> i64 {
    let response = make_authenticated_request(
        &Client::new(),
        reqwest::Method::POST,
        &format!("{}/matches/", app.address),
        token,
        Some(json!({
            "home_team_id": home_team_id,
            "away_team_id": away_team_id,
            "match_date": date
        })),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    let fixture: Value = response.json().await.expect("Failed to parse match");
    fixture["id"].as_i64().expect("Match has no id")
}
