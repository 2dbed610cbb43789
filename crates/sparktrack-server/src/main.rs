use tracing_subscriber::EnvFilter;

use sparktrack_auth::password;
use sparktrack_core::models::role::Role;
use sparktrack_core::models::user::UserAccount;
use sparktrack_server::config::ServerConfig;
use sparktrack_server::error::ApiError;
use sparktrack_server::state::AppState;
use sparktrack_storage::store::Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let store = Store::open(&config.data_path).await?;

    if let Some(admin_password) = &config.admin_password {
        let password_hash = password::hash_password(admin_password)?;
        let created = store
            .write(|db| -> Result<bool, ApiError> {
                if db.user("admin").is_some() {
                    return Ok(false);
                }
                db.put_user(UserAccount {
                    username: "admin".to_string(),
                    role: Role::Admin,
                    password_hash,
                    display_name: Some("Administrator".to_string()),
                });
                Ok(true)
            })
            .await
            .map_err(|e| eyre::eyre!("failed to create admin account: {e:?}"))?;
        if created {
            tracing::info!("admin account created");
        }
    }

    let state = AppState::new(store, &config.jwt_secret, config.token_ttl);
    let app = sparktrack_server::app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %config.bind, data = %config.data_path.display(), "sparktrack server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
