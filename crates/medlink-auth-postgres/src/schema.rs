//! Auth schema setup.
//!
//! Tables follow the JSONB resource-column pattern: the indexed key columns
//! are extracted at write time, the full record lives in `resource`. The
//! unique indexes here are the authoritative uniqueness guarantees for the
//! whole auth module.

use sqlx_core::executor::Executor;

use medlink_auth::{AuthError, AuthResult};

use crate::PgPool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS principal (
    id UUID PRIMARY KEY,
    role TEXT NOT NULL,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    license_number TEXT,
    resource JSONB NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS principal_role_email_key
    ON principal (role, email);
CREATE UNIQUE INDEX IF NOT EXISTS principal_role_username_key
    ON principal (role, username);
CREATE UNIQUE INDEX IF NOT EXISTS principal_license_number_key
    ON principal (license_number)
    WHERE license_number IS NOT NULL;

CREATE TABLE IF NOT EXISTS session (
    id UUID PRIMARY KEY,
    principal_id UUID NOT NULL,
    resource JSONB NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS session_principal_id_key
    ON session (principal_id);
"#;

/// Applies the auth schema (idempotent).
///
/// # Errors
///
/// Returns a `Storage` error if any statement fails.
pub async fn apply(pool: &PgPool) -> AuthResult<()> {
    pool.execute(SCHEMA)
        .await
        .map_err(|e| AuthError::storage(format!("failed to apply auth schema: {e}")))?;
    Ok(())
}
