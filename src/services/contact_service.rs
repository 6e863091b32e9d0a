use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use crate::database::manager::unique_violation;
use crate::database::models::Contact;
use crate::validation::{clean_cpf, is_valid_cpf, is_valid_email};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("CPF inválido")]
    InvalidCpf,

    #[error("Email inválido")]
    InvalidEmail,

    #[error("CPF já cadastrado")]
    CpfTaken,

    #[error("Telefone já cadastrado")]
    PhoneTaken,

    #[error("Email já cadastrado")]
    EmailTaken,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
}

/// The contact registration pipeline: shape validation, three uniqueness
/// checks, then the insert, all fail-fast.
///
/// The checks and the insert share one transaction, and the UNIQUE
/// constraints on cpf/phone/email remain the authority: a violation
/// surfacing from the insert maps back to the matching conflict error.
/// Exactly one insert on success, zero writes on any failure path.
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, new: NewContact) -> Result<Contact, ContactError> {
        if !is_valid_cpf(&new.cpf) {
            return Err(ContactError::InvalidCpf);
        }
        if !is_valid_email(&new.email) {
            return Err(ContactError::InvalidEmail);
        }

        // Stored and compared in canonical 11-digit form; client-side
        // punctuation never reaches the database
        let cpf = clean_cpf(&new.cpf);

        let mut tx = self.pool.begin().await?;

        if Self::exists(&mut tx, "cpf", &cpf).await? {
            return Err(ContactError::CpfTaken);
        }
        if Self::exists(&mut tx, "phone", &new.phone).await? {
            return Err(ContactError::PhoneTaken);
        }
        if Self::exists(&mut tx, "email", &new.email).await? {
            return Err(ContactError::EmailTaken);
        }

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (full_name, email, phone, cpf)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, phone, cpf, created_at
            "#,
        )
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&cpf)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("contacts_cpf_key") => ContactError::CpfTaken,
            Some("contacts_phone_key") => ContactError::PhoneTaken,
            Some("contacts_email_key") => ContactError::EmailTaken,
            _ => ContactError::Database(e),
        })?;

        tx.commit().await?;

        tracing::info!(contact_id = %contact.id, "contact registered");
        Ok(contact)
    }

    async fn exists(
        tx: &mut Transaction<'_, Postgres>,
        column: &str,
        value: &str,
    ) -> Result<bool, sqlx::Error> {
        // column comes from the three call sites above, never from input
        let query = format!("SELECT COUNT(*) FROM contacts WHERE {} = $1", column);
        let count: (i64,) = sqlx::query_as(&query)
            .bind(value)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count.0 > 0)
    }
}
