mod app;
mod config;
mod state;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "user_accounts=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // A missing JWT_SECRET fails here, before anything is served.
    let (app_state, db) = state::AppState::init().await?;
    tracing::info!(
        jwt_ttl_minutes = app_state.config.jwt.ttl_minutes,
        "configuration loaded"
    );

    state::run_migrations(&db).await?;
    tracing::info!("migrations applied");

    app::serve(app::build_app(app_state)).await
}
