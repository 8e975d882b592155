use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    state::AppState,
    users::{
        dto::{Credentials, LoginResponse, PublicUser, SignUpResponse},
        error::AccountError,
        services::AccountService,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/signup", post(sign_up))
        .route("/users/login", post(login))
}

#[instrument(skip(accounts, payload))]
pub async fn sign_up(
    State(accounts): State<AccountService>,
    Json(payload): Json<Credentials>,
) -> Result<(StatusCode, Json<SignUpResponse>), AccountError> {
    let res = accounts.sign_up(&payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(accounts, payload))]
pub async fn login(
    State(accounts): State<AccountService>,
    Json(payload): Json<Credentials>,
) -> Result<Json<LoginResponse>, AccountError> {
    let res = accounts.login(&payload.email, &payload.password).await?;
    Ok(Json(res))
}

#[instrument(skip(accounts))]
pub async fn list_users(
    State(accounts): State<AccountService>,
) -> Result<Json<Vec<PublicUser>>, AccountError> {
    Ok(Json(accounts.list_users().await?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        user_routes().with_state(AppState::in_memory("test-secret"))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn creds(email: &str, password: &str) -> Value {
        json!({ "email": email, "password": password })
    }

    #[tokio::test]
    async fn signup_returns_created_without_password() {
        let res = app()
            .oneshot(post_json("/users/signup", creds("test@example.com", "Password#1")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let body = body_json(res).await;
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user"]["email"], "test@example.com");
        assert_eq!(body["user"]["id"], 1);
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn signup_with_bad_input_is_bad_request() {
        let res = app()
            .oneshot(post_json("/users/signup", creds("bademail", "badpassword")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["message"], "Invalid email");
    }

    #[tokio::test]
    async fn signup_with_missing_fields_is_bad_request() {
        let res = app()
            .oneshot(post_json("/users/signup", json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_signup_is_bad_request() {
        let app = app();
        let first = app
            .clone()
            .oneshot(post_json("/users/signup", creds("existing@example.com", "Password#1")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(post_json("/users/signup", creds("existing@example.com", "Password#1")))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(second).await["message"], "Email already exists");
    }

    #[tokio::test]
    async fn login_flow_status_codes() {
        let app = app();
        app.clone()
            .oneshot(post_json("/users/signup", creds("test@example.com", "Password#1")))
            .await
            .unwrap();

        let ok = app
            .clone()
            .oneshot(post_json("/users/login", creds("test@example.com", "Password#1")))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = body_json(ok).await;
        assert_eq!(body["message"], "User logged in successfully");
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert!(body["user"].get("password").is_none());

        let wrong = app
            .clone()
            .oneshot(post_json("/users/login", creds("test@example.com", "Password#2")))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong).await["message"], "Invalid credentials");

        let unknown = app
            .clone()
            .oneshot(post_json("/users/login", creds("nobody@example.com", "Password#1")))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(unknown).await["message"], "User does not exist");

        let invalid = app
            .oneshot(post_json("/users/login", creds("bademail", "badpassword")))
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_users_empty_is_not_found() {
        let res = app().oneshot(get_req("/users")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["message"], "No users found");
    }

    #[tokio::test]
    async fn list_users_returns_public_records() {
        let app = app();
        for email in ["a@example.com", "b@example.com"] {
            app.clone()
                .oneshot(post_json("/users/signup", creds(email, "Password#1")))
                .await
                .unwrap();
        }

        let res = app.oneshot(get_req("/users")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(
            body,
            json!([
                { "id": 1, "email": "a@example.com" },
                { "id": 2, "email": "b@example.com" }
            ])
        );
    }
}
