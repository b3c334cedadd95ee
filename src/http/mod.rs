//! HTTP boundary for the audio tracker.
//!
//! An Axum server exposing three routes over the shared [`RecordStore`]:
//! ingest (`POST /api/audio`), list (`GET /api/audio`) and chart
//! (`GET /api/audio/chart`). Every route allows any origin.

mod cors;
mod routes;

#[cfg(test)]
mod tests;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};

use crate::error::ServerError;
use crate::store::RecordStore;

pub use cors::allow_any_origin;
pub use routes::{build_router, chart, ingest_record, list_records, HttpState};

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn run_http_server<F>(
    state: HttpState,
    addr: SocketAddr,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ServerError::Bind {
            addr: addr.to_string(),
            reason: err.to_string(),
        })
        .context("binding HTTP listener")?;

    let local_addr = listener.local_addr().unwrap_or(addr);
    info!("[Http] Listening on {}", local_addr);

    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| ServerError::Serve {
            reason: err.to_string(),
        })
        .context("serving HTTP router")?;

    info!("[Http] Server stopped");
    Ok(())
}

/// Serve a fresh store on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let state = HttpState::new(Arc::new(RecordStore::new()));
    run_http_server(state, addr, shutdown_signal()).await
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed the server
/// runs until the process is killed.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("[Http] Ctrl-C received, shutting down"),
        Err(err) => {
            warn!("[Http] Unable to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
