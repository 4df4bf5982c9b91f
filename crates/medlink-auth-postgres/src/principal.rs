//! Principal storage over PostgreSQL.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use uuid::Uuid;

use medlink_auth::storage::PrincipalStorage;
use medlink_auth::types::{Principal, Role};
use medlink_auth::{AuthError, AuthResult};

use crate::{map_db_err, PgPool};

/// PostgreSQL-backed principal store.
pub struct PostgresPrincipalStorage {
    pool: PgPool,
}

impl PostgresPrincipalStorage {
    /// Creates a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_principal(resource: serde_json::Value) -> AuthResult<Principal> {
    serde_json::from_value(resource)
        .map_err(|e| AuthError::storage(format!("malformed principal resource: {e}")))
}

fn decode_row(row: Option<(serde_json::Value,)>) -> AuthResult<Option<Principal>> {
    row.map(|(resource,)| decode_principal(resource)).transpose()
}

#[async_trait]
impl PrincipalStorage for PostgresPrincipalStorage {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let resource = serde_json::to_value(principal)
            .map_err(|e| AuthError::internal(format!("failed to serialize principal: {e}")))?;
        let license_number = match principal {
            Principal::Doctor(d) => Some(d.license.number.clone()),
            Principal::Patient(_) => None,
        };

        query(
            r#"
            INSERT INTO principal (id, role, username, email, license_number, resource)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(principal.id())
        .bind(principal.role().as_str())
        .bind(principal.username())
        .bind(principal.email())
        .bind(license_number)
        .bind(resource)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "An account with these details already exists"))?;

        Ok(())
    }

    async fn find_by_identifier(
        &self,
        role: Role,
        identifier: &str,
    ) -> AuthResult<Option<Principal>> {
        let row: Option<(serde_json::Value,)> = query_as(
            r#"
            SELECT resource FROM principal
            WHERE role = $1 AND (email = $2 OR username = $2)
            "#,
        )
        .bind(role.as_str())
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::storage(e.to_string()))?;

        decode_row(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Principal>> {
        let row: Option<(serde_json::Value,)> =
            query_as("SELECT resource FROM principal WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AuthError::storage(e.to_string()))?;

        decode_row(row)
    }

    async fn find_by_email(&self, role: Role, email: &str) -> AuthResult<Option<Principal>> {
        let row: Option<(serde_json::Value,)> =
            query_as("SELECT resource FROM principal WHERE role = $1 AND email = $2")
                .bind(role.as_str())
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AuthError::storage(e.to_string()))?;

        decode_row(row)
    }

    async fn find_by_username(&self, role: Role, username: &str) -> AuthResult<Option<Principal>> {
        let row: Option<(serde_json::Value,)> =
            query_as("SELECT resource FROM principal WHERE role = $1 AND username = $2")
                .bind(role.as_str())
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AuthError::storage(e.to_string()))?;

        decode_row(row)
    }

    async fn find_doctor_by_license(&self, license_number: &str) -> AuthResult<Option<Principal>> {
        let row: Option<(serde_json::Value,)> =
            query_as("SELECT resource FROM principal WHERE license_number = $1")
                .bind(license_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AuthError::storage(e.to_string()))?;

        decode_row(row)
    }
}
