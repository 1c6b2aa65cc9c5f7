use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for account registration
///
/// Missing fields deserialize to empty strings; presence is enforced by the
/// service's validation step rather than the transport layer.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for successful registration
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    pub id: Uuid,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

/// Response body for the authenticated account endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MeResponse {
    pub username: String,
}
