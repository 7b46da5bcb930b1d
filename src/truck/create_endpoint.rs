//! Defines the endpoint for registering a new truck.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, truck::core::create_truck};

/// The state needed to create a truck.
#[derive(Debug, Clone)]
pub struct CreateTruckState {
    /// The database connection for managing trucks.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTruckState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for registering a truck.
#[derive(Debug, Deserialize)]
pub struct TruckForm {
    /// The display name of the truck.
    pub name: String,
}

/// A route handler for registering a new truck.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_truck_endpoint(
    State(state): State<CreateTruckState>,
    Json(form): Json<TruckForm>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match create_truck(&form.name, &connection) {
        Ok(truck) => (StatusCode::CREATED, Json(truck)).into_response(),
        Err(error) => error.into_response(),
    }
}
