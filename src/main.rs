/// Back-office auth service - main entry point
use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use backoffice_auth::config::Config;
use backoffice_auth::db::{PgRefreshTokenStore, PgUserDirectory};
use backoffice_auth::routes;
use backoffice_auth::security::{PasswordHasher, TokenIssuer};
use backoffice_auth::services::AuthService;
use backoffice_auth::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting backoffice-auth on {}:{}",
        config.server_host,
        config.server_port
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database connection pool initialized");

    let issuer = TokenIssuer::new(&config);
    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let auth = AuthService::new(
        Arc::new(PgUserDirectory::new(db_pool.clone())),
        Arc::new(PgRefreshTokenStore::new(db_pool)),
        issuer.clone(),
        hasher,
        config.jwt_expiration.clone(),
    );

    let state = AppState {
        auth: Arc::new(auth),
        issuer,
    };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
