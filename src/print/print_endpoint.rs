//! Defines the endpoint for requesting bon/tagihan printing.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    database_id::TransactionId,
    print::{
        core::{DocumentKind, PrintStatus, print_transactions},
        sqlite_printer::SqlitePrinter,
    },
};

/// The state needed to print transactions.
#[derive(Debug, Clone)]
pub struct PrintState {
    /// The database connection the print boundary flags transactions in.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PrintState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for a print request: which rows, which document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    /// The transactions to print, in row order.
    pub transaction_ids: Vec<TransactionId>,
    /// Whether to print receipts or invoices.
    pub doc_type: DocumentKind,
}

/// A route handler for printing documents for a batch of transactions.
///
/// Responds with the legacy success signal so existing clients keep working.
pub async fn print_endpoint(
    State(state): State<PrintState>,
    Json(request): Json<PrintRequest>,
) -> impl IntoResponse {
    let printer = SqlitePrinter::new(state.db_connection);

    match print_transactions(&printer, &request.transaction_ids, request.doc_type) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": PrintStatus::LEGACY_SUCCESS_SIGNAL })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
