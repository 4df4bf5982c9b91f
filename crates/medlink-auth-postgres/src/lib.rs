//! PostgreSQL storage backend for medlink-auth.
//!
//! Provides persistent storage for:
//!
//! - Principal records (patients and doctors)
//! - Login sessions
//!
//! Records are stored as JSONB resources alongside the indexed key columns.
//! Uniqueness is enforced by unique indexes on `(role, email)`,
//! `(role, username)`, the doctor license number, and the session's
//! principal id; a duplicate-key failure surfaces as `AuthError::Conflict`,
//! which is what makes the service layer's pre-checks advisory rather than
//! authoritative.
//!
//! # Example
//!
//! ```ignore
//! use medlink_auth_postgres::PostgresAuthStorage;
//!
//! let storage = PostgresAuthStorage::connect("postgres://localhost/medlink").await?;
//! let principals = storage.principals();
//! let sessions = storage.sessions();
//! ```

pub mod principal;
pub mod schema;
pub mod session;

use std::sync::Arc;

use sqlx_core::pool::{Pool, PoolOptions};
use sqlx_postgres::Postgres;

use medlink_auth::AuthError;

pub use principal::PostgresPrincipalStorage;
pub use session::PostgresSessionStorage;

/// PostgreSQL connection pool type alias.
pub type PgPool = Pool<Postgres>;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a database error to the auth error taxonomy.
///
/// Unique-index violations become `Conflict` with the given message;
/// everything else is a `Storage` error.
pub(crate) fn map_db_err(err: sqlx_core::Error, conflict_message: &str) -> AuthError {
    if let sqlx_core::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AuthError::conflict(conflict_message);
        }
    }
    AuthError::storage(err.to_string())
}

/// Entry point bundling both storage implementations over one pool.
pub struct PostgresAuthStorage {
    pool: PgPool,
}

impl PostgresAuthStorage {
    /// Connects to PostgreSQL and applies the auth schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema setup fails.
    pub async fn connect(url: &str) -> Result<Self, AuthError> {
        let pool: PgPool = PoolOptions::<Postgres>::new()
            .max_connections(10)
            .connect(url)
            .await
            .map_err(|e| AuthError::storage(format!("failed to connect to PostgreSQL: {e}")))?;

        schema::apply(&pool).await?;
        tracing::info!("Connected to PostgreSQL auth storage");

        Ok(Self { pool })
    }

    /// Creates the storage wrapper from an existing pool (applies schema).
    ///
    /// # Errors
    ///
    /// Returns an error if schema setup fails.
    pub async fn from_pool(pool: PgPool) -> Result<Self, AuthError> {
        schema::apply(&pool).await?;
        Ok(Self { pool })
    }

    /// The principal storage implementation.
    #[must_use]
    pub fn principals(&self) -> Arc<PostgresPrincipalStorage> {
        Arc::new(PostgresPrincipalStorage::new(self.pool.clone()))
    }

    /// The session storage implementation.
    #[must_use]
    pub fn sessions(&self) -> Arc<PostgresSessionStorage> {
        Arc::new(PostgresSessionStorage::new(self.pool.clone()))
    }
}
