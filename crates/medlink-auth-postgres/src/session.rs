//! Session storage over PostgreSQL.
//!
//! The unique index on `principal_id` resolves login's find-or-create race:
//! the losing `create` receives a duplicate-key error, surfaced as
//! `Conflict`, and the service retries as a lookup.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use uuid::Uuid;

use medlink_auth::storage::SessionStorage;
use medlink_auth::types::Session;
use medlink_auth::{AuthError, AuthResult};

use crate::{map_db_err, PgPool};

/// PostgreSQL-backed session store.
pub struct PostgresSessionStorage {
    pool: PgPool,
}

impl PostgresSessionStorage {
    /// Creates a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_session(resource: serde_json::Value) -> AuthResult<Session> {
    serde_json::from_value(resource)
        .map_err(|e| AuthError::storage(format!("malformed session resource: {e}")))
}

#[async_trait]
impl SessionStorage for PostgresSessionStorage {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let resource = serde_json::to_value(session)
            .map_err(|e| AuthError::internal(format!("failed to serialize session: {e}")))?;

        query(
            r#"
            INSERT INTO session (id, principal_id, resource)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.id)
        .bind(session.principal_id)
        .bind(resource)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "A session already exists for this principal"))?;

        Ok(())
    }

    async fn find_by_principal(&self, principal_id: Uuid) -> AuthResult<Option<Session>> {
        let row: Option<(serde_json::Value,)> =
            query_as("SELECT resource FROM session WHERE principal_id = $1")
                .bind(principal_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AuthError::storage(e.to_string()))?;

        row.map(|(resource,)| decode_session(resource)).transpose()
    }

    async fn delete_by_principal(&self, principal_id: Uuid) -> AuthResult<bool> {
        let result = query("DELETE FROM session WHERE principal_id = $1")
            .bind(principal_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::storage(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_valid(&self, principal_id: Uuid, is_valid: bool) -> AuthResult<()> {
        let result = query(
            r#"
            UPDATE session
            SET resource = jsonb_set(resource, '{isValid}', to_jsonb($2::boolean))
            WHERE principal_id = $1
            "#,
        )
        .bind(principal_id)
        .bind(is_valid)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::not_found("no session for principal"));
        }
        Ok(())
    }
}
