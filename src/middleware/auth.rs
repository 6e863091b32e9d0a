use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{AuthError, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Authenticated user context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Token middleware gating the contact endpoints: missing token is 401,
/// an invalid or expired one is 403. On success the decoded [`AuthUser`]
/// is injected into the request extensions.
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;

    let claims = state.auth.verify_token(&token).map_err(|e| match e {
        AuthError::TokenExpired => ApiError::forbidden("Token expirado"),
        _ => ApiError::forbidden("Token inválido"),
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Pull the session token out of the Authorization header. The wire
/// contract sends the bare token; a `Bearer ` prefix is also accepted.
fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Token não fornecido"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::forbidden("Token inválido"))?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("Token não fornecido"));
    }

    Ok(token.to_string())
}
