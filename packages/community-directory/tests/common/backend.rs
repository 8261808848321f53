//! In-process stand-in for the `/api/*` backend.

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::fixtures::{amina_json, members_json, AMINA_EMAIL, AMINA_PASSWORD, AMINA_TOKEN};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A backend that knows one account (Amina) and two members.
pub fn directory_backend() -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/profile", get(profile))
        .route("/api/members", get(members))
}

/// A backend whose every endpoint fails with a server error.
pub fn broken_backend() -> Router {
    Router::new().route(
        "/api/members",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == AMINA_EMAIL && body["password"] == AMINA_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "token": AMINA_TOKEN, "user": amina_json() })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == AMINA_EMAIL {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Email already registered" })),
        );
    }

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let user = json!({
        "id": "7",
        "fullName": body["fullName"],
        "email": email,
        "dateOfBirth": body["dateOfBirth"],
        "gender": body["gender"],
        "location": body["location"],
        "occupation": body["occupation"],
    });
    (
        StatusCode::CREATED,
        Json(json!({ "token": format!("tok-{email}"), "user": user })),
    )
}

async fn profile(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let expected = format!("Bearer {AMINA_TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => (StatusCode::OK, Json(amina_json())),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid or expired token" })),
        ),
    }
}

async fn members() -> Json<Value> {
    Json(members_json())
}
