use std::{env, sync::Arc};

use medlink_auth::storage::{PrincipalStorage, SessionStorage};
use medlink_auth::{AuthHttpState, AuthService, JwtService};
use medlink_auth_memory::{InMemoryPrincipalStorage, InMemorySessionStorage};
use medlink_auth_postgres::PostgresAuthStorage;
use medlink_server::config::{load_config, ServerConfig};
use medlink_server::{build_router, observability};

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From MEDLINK_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (medlink.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (MEDLINK_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env if present (before anything else); its absence is not an error
    let _ = dotenvy::dotenv();

    let (config_path, source) = resolve_config_path();
    let explicit = !matches!(source, ConfigSource::Default);

    let cfg = match load_config(&config_path, explicit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    observability::init_tracing(&cfg.logging.level);
    tracing::info!(path = %config_path, source = %source, "Configuration loaded");

    if let Err(e) = cfg.auth.validate() {
        eprintln!("Configuration error: {e}");
        std::process::exit(2);
    }

    let (principals, sessions) = match connect_storage(&cfg).await {
        Ok(stores) => stores,
        Err(e) => {
            eprintln!("Storage error: {e}");
            std::process::exit(2);
        }
    };

    let jwt = Arc::new(JwtService::new(
        cfg.auth.token.secret.as_bytes(),
        cfg.auth.issuer.clone(),
        cfg.auth.token.access_token_lifetime,
    ));
    let state = AuthHttpState {
        service: AuthService::new(principals, sessions, jwt),
        config: cfg.auth.clone(),
    };
    let app = build_router(state, &cfg);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Picks the storage backend: PostgreSQL when a URL is configured, otherwise
/// the in-memory backend for local development.
async fn connect_storage(
    cfg: &ServerConfig,
) -> Result<(Arc<dyn PrincipalStorage>, Arc<dyn SessionStorage>), medlink_auth::AuthError> {
    match cfg.database.url.as_deref() {
        Some(url) => {
            let storage = PostgresAuthStorage::connect(url).await?;
            Ok((
                storage.principals() as Arc<dyn PrincipalStorage>,
                storage.sessions() as Arc<dyn SessionStorage>,
            ))
        }
        None => {
            tracing::warn!("No database configured, using in-memory storage");
            Ok((
                Arc::new(InMemoryPrincipalStorage::new()) as Arc<dyn PrincipalStorage>,
                Arc::new(InMemorySessionStorage::new()) as Arc<dyn SessionStorage>,
            ))
        }
    }
}

/// Resolves the config path from CLI, environment, or the default.
fn resolve_config_path() -> (String, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return (path, ConfigSource::CliArgument);
            }
        }
    }

    if let Ok(path) = env::var("MEDLINK_CONFIG") {
        return (path, ConfigSource::EnvironmentVariable);
    }

    ("medlink.toml".to_string(), ConfigSource::Default)
}
