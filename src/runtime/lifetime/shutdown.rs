use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，Unix 下同时监听 SIGTERM（容器停止时发送）
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM");
        tokio::select! {
            res = signal::ctrl_c() => res.expect("Failed to listen for Ctrl+C"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");

    warn!("Shutdown signal received, initiating graceful shutdown...");
}
