//! Defines the endpoint for editing an existing truck transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState,
    database_id::TransactionId,
    transaction::command::{TruckTransactionForm, edit_transaction},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for editing a truck transaction.
///
/// Edits go through the same customer resolution as creation; print flags
/// are untouched by edits.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(form): Json<TruckTransactionForm>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match edit_transaction(transaction_id, form, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_response(),
    }
}
