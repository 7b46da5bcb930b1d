//! Armada is a back-office ledger for a trucking/freight business.
//!
//! It records truck transactions, resolves customer references before any
//! write is persisted, aggregates cost and revenue per truck for reporting,
//! and coordinates the receipt/invoice print workflow together with the
//! row-selection state that gates which rows may be mutated.
//!
//! This library provides a JSON HTTP API over the ledger plus the pure
//! building blocks (aggregation, selection, table projection) that a client
//! front-end drives directly.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
pub mod customer;
mod database_id;
mod db;
pub mod endpoints;
pub mod print;
pub mod report;
mod routing;
pub mod selection;
pub mod transaction;
pub mod truck;

pub use app_state::AppState;
pub use database_id::{CustomerId, DatabaseId, TransactionId, TruckId};
pub use db::initialize as initialize_db;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The customer initial on a transaction payload did not resolve to a
    /// registered customer. The write must be aborted entirely.
    #[error("Customer tidak terdaftar")]
    CustomerNotRegistered,

    /// The customer initial used to create a customer already exists.
    #[error("the customer initial \"{0}\" is already registered")]
    DuplicateCustomerInitial(String),

    /// A monetary field was given a negative value. Costs and selling prices
    /// are recorded as non-negative amounts.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount {
        /// The name of the offending field.
        field: &'static str,
        /// The value that was rejected.
        value: f64,
    },

    /// A print request was issued with no transactions selected.
    #[error("no transactions were selected for printing")]
    NothingToPrint,

    /// The print boundary reported something other than success.
    ///
    /// The reason is logged on the server; clients only ever see the generic
    /// retry message.
    #[error("print request failed: {0}")]
    PrintFailed(String),

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::CustomerNotRegistered => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self.to_string())
            }
            Error::DuplicateCustomerInitial(_) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self.to_string())
            }
            Error::NegativeAmount { .. } => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self.to_string())
            }
            Error::NothingToPrint => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self.to_string())
            }
            Error::PrintFailed(reason) => {
                tracing::warn!("print request failed: {reason}");
                error_response(StatusCode::BAD_GATEWAY, print::RETRY_MESSAGE)
            }
            Error::UpdateMissingTransaction => {
                error_response(StatusCode::NOT_FOUND, &self.to_string())
            }
            Error::NotFound => error_response(StatusCode::NOT_FOUND, &self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred, check the server logs for more details",
                )
            }
        }
    }
}

/// Build a JSON error response with the shape `{"error": message}`.
fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
