//! Defines the read-only endpoints for truck transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState,
    database_id::{CustomerId, TruckId},
    transaction::{
        additional::get_misc_truck_transactions_by_truck_id,
        core::{
            get_truck_transaction_auto_complete, get_truck_transactions,
            get_truck_transactions_by_customer_id, get_truck_transactions_by_truck_id,
        },
    },
};

/// The state needed to query transactions.
#[derive(Debug, Clone)]
pub struct TransactionQueryState {
    /// The database connection the queries read from.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler listing all truck transactions.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionQueryState>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_truck_transactions(&connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler listing the truck transactions of one customer.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transactions_by_customer_endpoint(
    State(state): State<TransactionQueryState>,
    Path(customer_id): Path<CustomerId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_truck_transactions_by_customer_id(customer_id, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler listing the truck transactions of one truck.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transactions_by_truck_endpoint(
    State(state): State<TransactionQueryState>,
    Path(truck_id): Path<TruckId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_truck_transactions_by_truck_id(truck_id, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler listing the additional (misc) transactions of one truck.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_misc_transactions_by_truck_endpoint(
    State(state): State<TransactionQueryState>,
    Path(truck_id): Path<TruckId>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_misc_truck_transactions_by_truck_id(truck_id, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler serving the autocomplete values for transaction forms.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_auto_complete_endpoint(
    State(state): State<TransactionQueryState>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match get_truck_transaction_auto_complete(&connection) {
        Ok(auto_complete) => Json(auto_complete).into_response(),
        Err(error) => error.into_response(),
    }
}
