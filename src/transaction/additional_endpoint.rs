//! Defines the endpoint for booking additional (misc) truck transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState,
    transaction::additional::{AdditionalTransactionForm, create_additional_truck_transaction},
};

/// The state needed to create additional transactions.
#[derive(Debug, Clone)]
pub struct CreateMiscTransactionState {
    /// The database connection the transaction is written to.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateMiscTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for booking an additional truck transaction.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_misc_transaction_endpoint(
    State(state): State<CreateMiscTransactionState>,
    Json(form): Json<AdditionalTransactionForm>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match create_additional_truck_transaction(&form, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}
