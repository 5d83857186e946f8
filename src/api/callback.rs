use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::{Mutex, oneshot};

/// What the single redirect request carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Authorized { code: String },
    CsrfMismatch,
    MissingParams,
}

/// Shared between the handler and the listener that waits for it.
#[derive(Clone)]
pub struct CallbackContext {
    pub provider: &'static str,
    pub expected_state: String,
    pub sender: Arc<Mutex<Option<oneshot::Sender<RedirectOutcome>>>>,
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(ctx): Extension<CallbackContext>,
) -> (StatusCode, Html<String>) {
    // Only the first request is answered; the sender is gone afterwards.
    let Some(sender) = ctx.sender.lock().await.take() else {
        return (
            StatusCode::GONE,
            Html("Authorization already handled.".to_string()),
        );
    };

    let (outcome, status, body) = match (params.get("code"), params.get("state")) {
        (Some(code), Some(state)) if *state == ctx.expected_state => (
            RedirectOutcome::Authorized { code: code.clone() },
            StatusCode::OK,
            format!(
                "<html><body><h1>{} authorization successful!</h1>You can close this window and return to the console.</body></html>",
                ctx.provider
            ),
        ),
        (Some(_), Some(_)) => (
            RedirectOutcome::CsrfMismatch,
            StatusCode::BAD_REQUEST,
            "State mismatch. Possible CSRF attack.".to_string(),
        ),
        _ => (
            RedirectOutcome::MissingParams,
            StatusCode::BAD_REQUEST,
            "Missing code or state parameter.".to_string(),
        ),
    };

    let _ = sender.send(outcome);
    (status, Html(body))
}
