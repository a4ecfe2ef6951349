use tokio::net::TcpListener;
use tokio::signal;

use crate::config::Config;
use crate::routes;
use crate::state::AppState;

/// Serves the game endpoint until Ctrl+C or SIGTERM.
pub async fn run(config: Config) -> std::io::Result<()> {
    let state = AppState::new(config.max_games);
    let app = routes::router(state, &config.rpc_path);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let actual_port = listener.local_addr()?.port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
