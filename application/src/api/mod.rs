//! HTTP API definitions.

pub mod contract;
pub mod payment;
pub mod reminder;

use axum::{
    routing::{get, patch, post},
    Router,
};

/// Builds a [`Router`] serving all the API endpoints.
///
/// The [`Service`] is expected to be provided as an [`axum::Extension`].
///
/// [`Service`]: crate::Service
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/contracts", post(contract::create).get(contract::list))
        .route("/contracts/:id", get(contract::details))
        .route("/contracts/:id/status", patch(contract::update_status))
        .route("/contracts/:id/payments", get(payment::of_contract))
        .route("/contracts/by-phone/:phone", get(contract::list_by_phone))
        .route("/tenants/:phone", get(contract::tenant_by_phone))
        .route("/payments/overdue", get(payment::overdue))
        .route("/payments/:id/record", post(payment::record))
        .route("/reminders/due", get(reminder::due))
        .route("/reminders/:id/sent", post(reminder::mark_sent))
}
