// Start of file: src/main.rs

use axum::{Router, serve};
use tokio::net::TcpListener;
use tracing::info;

use org_stats_app::config::environment::EnvironmentVariables;
use org_stats_app::config::state::AppState;
use org_stats_app::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    // ! Bad configuration ends startup with the full context chain
    let state: AppState = AppState::new(EnvironmentVariables::load()?)?;
    let env = state.environment.clone();

    let app: Router = server::create_app(state);
    let listener: TcpListener = server::setup_listener(&env).await?;

    info!("Server listening on: {}://{}", env.protocol, listener.local_addr()?);
    println!("Open {}://{} in your browser", env.protocol, listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
