use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, instrument};

use super::types::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse};
use crate::session::SessionClaims;
use crate::shared::{AppError, AppState};

/// HTTP handler for account registration
///
/// POST /register
/// Returns 201 with the new account id
#[instrument(name = "register", skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let id = state.account_service.register(request).await?;

    info!(account_id = %id, "Registration request completed");
    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// HTTP handler for login
///
/// POST /login
/// Returns a signed session token on credential match
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.account_service.authenticate(request).await?;

    info!(token_length = token.len(), "Login request completed");
    Ok(Json(LoginResponse { token }))
}

/// HTTP handler for the authenticated account endpoint
///
/// GET /me (behind jwt_auth)
/// Echoes the subject of the verified bearer token
#[instrument(name = "me", skip(claims))]
pub async fn me(Extension(claims): Extension<SessionClaims>) -> Json<MeResponse> {
    Json(MeResponse {
        username: claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::test_state;
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        let state = test_state();
        Router::new()
            .route("/me", get(me))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                crate::session::jwt_auth,
            ))
            .route("/register", post(register))
            .route("/login", post(login))
            .with_state(state)
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_handler_created() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "/register",
                json!({"username": "alice", "email": "a@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let register_response: RegisterResponse = serde_json::from_slice(&body).unwrap();
        assert!(!register_response.id.is_nil());
    }

    #[tokio::test]
    async fn test_register_handler_missing_field_is_bad_request() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "/register",
                json!({"username": "alice", "email": "a@x.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_handler_returns_token() {
        let app = test_app();

        app.clone()
            .oneshot(json_request(
                "/register",
                json!({"username": "alice", "email": "a@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "/login",
                json!({"email": "a@x.com", "password": "secret123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login_response: LoginResponse = serde_json::from_slice(&body).unwrap();
        assert!(!login_response.token.is_empty());
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
