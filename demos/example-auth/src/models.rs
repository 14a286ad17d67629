use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteAccountRequest {
    pub password: String,
}

#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// Success envelope.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Response<T> {
    pub status: u16,
    pub data: T,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,
    pub detail: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ValidationResponse {
    pub status: u16,
    pub errors: Vec<FieldError>,
}
