use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service::UserService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login - Authenticate and receive a session token
///
/// Expected Input:
/// ```json
/// { "email": "ana@x.com", "password": "secret123" }
/// ```
///
/// Returns 200 `{ "token": "..." }`; unknown email and wrong password both
/// answer 400 with the same message.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let service = UserService::new(state.pool.clone(), state.auth.clone());
    let token = service.login(&payload.email, &payload.password).await?;

    Ok(ApiResponse::success(LoginResponse { token }))
}
