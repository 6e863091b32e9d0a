use axum::{extract::State, Json};
use serde::Deserialize;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service::UserService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /api/register - Create a new account
///
/// Expected Input:
/// ```json
/// { "name": "Ana", "email": "ana@x.com", "password": "secret123" }
/// ```
///
/// Returns 201 with the created row, 400 on invalid or already-registered
/// email. The row includes the password hash; see DESIGN.md.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    let service = UserService::new(state.pool.clone(), state.auth.clone());
    let user = service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok(ApiResponse::created(user))
}
