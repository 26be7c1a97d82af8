use andyx::{
    api::routes::create_router,
    utils::{config::Config, telemetry::init_tracing},
    AppState, ChatService, GeminiClient,
};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(config.logging.format)?;

    let client = GeminiClient::new(
        config.llm.api_key.clone(),
        config.llm.api_base.clone(),
        config.llm.model.clone(),
        config.llm.timeout,
    )?;
    let chat = ChatService::new(Arc::new(client), config.llm.timeout);

    let address = config.server.address();
    let state = AppState {
        config: Arc::new(config),
        chat: Arc::new(chat),
    };
    let model = state.chat.model_name().to_string();
    let app = create_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %listener.local_addr()?, model = %model, "Andyx server is online");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
