use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Listens for SIGINT and SIGTERM and cancels the run token. The engine
/// checks the token at chunk boundaries, so a committed chunk is never
/// interrupted.
pub struct ShutdownCoordinator {
    cancel: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn register_handlers(&self) {
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let ctrl_c = async {
                signal::ctrl_c()
                    .await
                    .expect("Failed to install SIGINT handler");
            };

            #[cfg(unix)]
            let terminate = async {
                signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to install SIGTERM handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => {
                    info!("Received SIGINT (Ctrl+C), stopping at the next chunk boundary");
                }
                _ = terminate => {
                    info!("Received SIGTERM, stopping at the next chunk boundary");
                }
            }

            cancel.cancel();
        });
    }
}

/// Exit codes for the importer.
#[derive(Debug, Clone, Copy)]
pub enum ExitStatus {
    Success = 0,
    Failed = 1,
    Stopped = 130, // standard exit code for SIGINT
}

impl ExitStatus {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
