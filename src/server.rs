use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{
    api::{self, CallbackContext, RedirectOutcome},
    error::{MigrationError, Result},
};

/// One-shot loopback HTTP listener that captures a single OAuth redirect.
pub struct RedirectListener {
    provider: &'static str,
    listener: TcpListener,
}

impl RedirectListener {
    pub async fn bind(provider: &'static str, addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| MigrationError::Listener(format!("cannot bind {addr}: {e}")))?;
        Ok(Self { provider, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| MigrationError::Listener(e.to_string()))
    }

    /// Serves exactly one request, whatever its path, then shuts down.
    pub async fn await_redirect(self, expected_state: &str) -> Result<RedirectOutcome> {
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let ctx = CallbackContext {
            provider: self.provider,
            expected_state: expected_state.to_string(),
            sender: Arc::new(Mutex::new(Some(outcome_tx))),
        };

        let app = Router::new()
            .route("/callback", get(api::callback))
            .fallback(api::callback)
            .layer(Extension(ctx));

        let server = tokio::spawn(async move {
            axum::serve(self.listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let outcome = outcome_rx.await;
        let _ = shutdown_tx.send(());

        match server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(MigrationError::Listener(e.to_string())),
            Err(e) => return Err(MigrationError::Listener(e.to_string())),
        }

        outcome.map_err(|_| MigrationError::Listener("listener stopped before a redirect".into()))
    }
}
