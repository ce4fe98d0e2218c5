use tokio::net::TcpListener;

use crate::{app::AppContext, controller, Result};

/// Serves the HTTP backend until Ctrl-C.
///
/// # Errors
///
/// When the address cannot be bound or the server fails.
pub async fn serve(ctx: AppContext, binding: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((binding, port)).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");
    let router = controller::routes(ctx);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(err.msg = %err, "shutdown_signal_error");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting_down");
}
