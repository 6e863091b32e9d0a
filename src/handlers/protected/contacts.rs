use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::Contact;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::contact_service::{ContactService, NewContact};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
}

/// POST /api/contacts - Register a contact (token required)
///
/// Expected Input:
/// ```json
/// {
///   "fullName": "Ana Silva",
///   "email": "ana2@x.com",
///   "phone": "(11) 91234-5678",
///   "cpf": "529.982.247-25"
/// }
/// ```
///
/// Returns 201 with the persisted row (snake_case columns, cleaned CPF),
/// 400 on validation failure or any cpf/phone/email conflict.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ContactRequest>,
) -> ApiResult<Contact> {
    tracing::debug!(
        user_id = %auth_user.id,
        user = %auth_user.email,
        "contact registration requested"
    );

    let service = ContactService::new(state.pool.clone());
    let contact = service
        .register(NewContact {
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            cpf: payload.cpf,
        })
        .await?;

    Ok(ApiResponse::created(contact))
}
