//! HTTP handlers served by the local redirect listener.
//!
//! The only endpoint is the OAuth redirect target. It validates the `code`
//! and `state` query parameters and hands the outcome back to the waiting
//! authorization flow through a one-shot channel.

mod callback;

pub use callback::{CallbackContext, RedirectOutcome, callback};
