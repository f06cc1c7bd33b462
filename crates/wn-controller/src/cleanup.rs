//! Emergency cleanup: registers SIGINT/SIGTERM handling at process start so
//! an interrupted deploy still tears down the topology (spec §4.8 "Failure
//! semantics", §9 "scoped resource acquisition pairs with a destroy path
//! registered at process start").

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::controller::Controller;

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!(error = %e, "failed to register SIGTERM handler"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}

/// Spawns the background task that waits for SIGINT/SIGTERM and runs
/// `destroy` on the shared controller before the process exits.
pub fn register(controller: Arc<Mutex<Controller>>) {
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("running emergency cleanup");
        let mut guard = controller.lock().await;
        if let Err(e) = guard.destroy().await {
            error!(error = %e, "emergency cleanup failed");
        }
        std::process::exit(0);
    });
}
