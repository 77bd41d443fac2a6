use crate::{error::AppError, AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

// The client page is compiled into the binary, so the server has no runtime
// asset directory to locate.
const INDEX_HTML: &str = include_str!("../assets/index.html");
const APP_JS: &str = include_str!("../assets/app.js");

/// # GET /
/// Serves the static roster page. No business logic here.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// # GET /assets/app.js
pub async fn client_script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

/// # POST /api/users
/// Validates and registers a participant, then returns the full updated
/// roster (id descending).
///
/// Validation failures are returned with HTTP 200 and an `error` object: the
/// client distinguishes failure by payload shape, not status code. That is a
/// deliberate contract choice, kept because the client depends on it.
pub async fn store_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // A malformed or absent body validates like an empty submission, so the
    // caller sees the ordinary `required` failures instead of a parse error.
    let input: Map<String, Value> = serde_json::from_slice(&body).unwrap_or_default();

    let outcome = validator::validate(
        &input,
        &[
            ("name", "required"),
            ("email", "required|email|unique:users,email"),
        ],
        state.unique.as_ref(),
    )
    .await?;

    if outcome.fails() {
        return Ok(Json(json!({ "error": outcome.errors() })));
    }

    let name = input.get("name").and_then(Value::as_str).unwrap_or_default();
    let email = input.get("email").and_then(Value::as_str).unwrap_or_default();

    let users = state.roster.add_participant(name, email).await?;

    Ok(Json(json!({ "users": users })))
}

/// # POST /api/reset
/// Clears the roster.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    state.roster.reset().await?;
    Ok(Json(json!({ "success": true })))
}

/// Shared fallback for unknown paths and unsupported methods.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

#[cfg(test)]
mod tests {
    use crate::{app, service, AppState};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use database::{MemoryParticipantStore, ParticipantStore};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn store_and_app() -> (Arc<MemoryParticipantStore>, Router) {
        let store = Arc::new(MemoryParticipantStore::new());
        let app = app(Arc::new(AppState::new(store.clone())));
        (store, app)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let (_, app) = store_and_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("id=\"userForm\""));
        assert!(page.contains("/assets/app.js"));
    }

    #[tokio::test]
    async fn first_add_returns_a_full_share() {
        let (_, app) = store_and_app();
        let (status, body) = send(
            &app,
            post_json("/api/users", r#"{"name":"Alice","email":"a@x.com"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["name"], "Alice");
        assert_eq!(users[0]["email"], "a@x.com");
        // Decimal shares serialize as fixed two-decimal strings.
        assert_eq!(users[0]["share"], "100.00");
    }

    #[tokio::test]
    async fn second_add_rebalances_and_lists_newest_first() {
        let (_, app) = store_and_app();
        send(
            &app,
            post_json("/api/users", r#"{"name":"Alice","email":"a@x.com"}"#),
        )
        .await;
        let (status, body) = send(
            &app,
            post_json("/api/users", r#"{"name":"Bob","email":"b@x.com"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["name"], "Bob");
        assert_eq!(users[1]["name"], "Alice");
        assert_eq!(users[0]["share"], "50.00");
        assert_eq!(users[1]["share"], "50.00");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_with_status_200() {
        let (store, app) = store_and_app();
        send(
            &app,
            post_json("/api/users", r#"{"name":"Alice","email":"a@x.com"}"#),
        )
        .await;
        send(
            &app,
            post_json("/api/users", r#"{"name":"Bob","email":"b@x.com"}"#),
        )
        .await;

        let (status, body) = send(
            &app,
            post_json("/api/users", r#"{"name":"Carl","email":"a@x.com"}"#),
        )
        .await;

        // Failure is signalled by the payload shape, not the status code.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["error"],
            json!({ "email": ["Field 'email' must be unique."] })
        );

        // The roster is untouched: still two rows at 50.00 each.
        let roster = store.list_all().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|p| p.share.to_string() == "50.00"));
    }

    #[tokio::test]
    async fn malformed_body_reports_required_fields() {
        let (store, app) = store_and_app();
        let (status, body) = send(&app, post_json("/api/users", "this is not json")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["error"],
            json!({
                "email": [
                    "Field 'email' is required.",
                    "Field 'email' must be a valid email.",
                ],
                "name": ["Field 'name' is required."],
            })
        );
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_body_reports_required_fields() {
        let (_, app) = store_and_app();
        let (status, body) = send(&app, post_json("/api/users", "")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"]["name"].is_array());
        assert!(body["error"]["email"].is_array());
    }

    #[tokio::test]
    async fn reset_empties_the_roster_and_is_idempotent() {
        let (store, app) = store_and_app();
        send(
            &app,
            post_json("/api/users", r#"{"name":"Alice","email":"a@x.com"}"#),
        )
        .await;

        for _ in 0..2 {
            let (status, body) = send(&app, post_json("/api/reset", "")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "success": true }));
            assert_eq!(store.count().await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn unknown_route_is_a_json_404() {
        let (_, app) = store_and_app();
        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Route not found" }));
    }

    #[tokio::test]
    async fn wrong_method_on_a_known_path_is_also_404() {
        let (_, app) = store_and_app();
        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Route not found" }));
    }

    #[tokio::test]
    async fn trailing_slashes_are_trimmed_before_routing() {
        let store = Arc::new(MemoryParticipantStore::new());
        let service = service(Arc::new(AppState::new(store)));

        let response = service
            .clone()
            .oneshot(post_json(
                "/api/users/",
                r#"{"name":"Alice","email":"a@x.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["users"].as_array().unwrap().len(), 1);
    }
}
