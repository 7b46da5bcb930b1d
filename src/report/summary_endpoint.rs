//! Defines the endpoint serving the per-truck summary report.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState,
    report::summary::{SummaryQuery, summarize},
};

/// The state needed to build the summary report.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection the report reads from.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the per-truck cost/revenue summary.
///
/// Accepts optional `startDate`/`endDate` ISO-8601 query parameters; the
/// window defaults to the start of the current month through today.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let connection = state.db_connection.lock().unwrap();

    match summarize(&query, &connection) {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use time::macros::date;

    use crate::{
        report::summary::SummaryQuery,
        report::summary_endpoint::{SummaryState, get_summary_endpoint},
        transaction::core::test_utils::{get_test_connection, insert_sample},
        truck::create_truck,
    };

    #[tokio::test]
    async fn serves_the_summary_for_the_requested_window() {
        let conn = get_test_connection();
        let truck = create_truck("Truck A", &conn).unwrap();
        insert_sample(date!(2025 - 06 - 10), truck.id, &conn);
        let state = SummaryState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let query = SummaryQuery {
            start_date: Some(date!(2025 - 06 - 01)),
            end_date: Some(date!(2025 - 06 - 30)),
        };
        let response = get_summary_endpoint(State(state), Query(query))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary["Truck A"]["cost"], 100.0);
        assert_eq!(summary["Truck A"]["sellingPrice"], 150.0);
    }
}
