mod app;
mod auth;
mod config;
mod error;
mod game;
mod guard;
mod quiz;
mod state;
mod storage;
mod sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "securepath=debug,axum=info,tower_http=info".to_string());
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

    let app_state = state::AppState::init()?;
    tracing::info!(
        users = app_state.users.len().await,
        difficulty = ?app_state.config.default_difficulty,
        "demo directory seeded"
    );

    let sweeper = sweeper::spawn(
        app_state.clone(),
        app_state.config.sweep_interval,
        app_state.config.idle_ttl,
    );
    let served = app::serve(app::build_app(app_state)).await;
    sweeper.abort();
    served
}
