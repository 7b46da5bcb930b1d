//! Defines the endpoint for registering a new customer.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, customer::core::create_customer};

/// The state needed to create a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerState {
    /// The database connection for managing customers.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for registering a customer.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    /// The short code the customer is referred to by on forms.
    pub initial: String,
}

/// A route handler for registering a new customer.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_customer_endpoint(
    State(state): State<CreateCustomerState>,
    Json(form): Json<CustomerForm>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match create_customer(&form.initial, &connection) {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(error) => error.into_response(),
    }
}
