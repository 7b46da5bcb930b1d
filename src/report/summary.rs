//! Aggregation of truck transactions into a per-truck summary.
//!
//! The aggregation is best-effort by design: a row whose truck id has no
//! matching truck record is logged and skipped, never an error. The report
//! stays available even when the data has drifted referentially.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    transaction::{GroupedRow, get_grouped_truck_transactions},
    truck::{Truck, get_trucks},
};

/// Accumulated cost and revenue for one truck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckTotals {
    /// Sum of the costs of the truck's transactions in the window.
    pub cost: f64,
    /// Sum of the selling prices of the truck's transactions in the window.
    pub selling_price: f64,
}

/// The report: truck name to accumulated totals.
///
/// Key order carries no meaning; compare summaries as mappings.
pub type TransactionSummary = HashMap<String, TruckTotals>;

/// The date window requested for a summary report.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Inclusive start of the window. Defaults to the start of the current
    /// month.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Inclusive end of the window. Defaults to the current day.
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl SummaryQuery {
    /// Resolve the window against `today`, filling in the defaults.
    pub fn window_or_default(&self, today: Date) -> (Date, Date) {
        let start = self.start_date.unwrap_or_else(|| today.replace_day(1).unwrap());
        let end = self.end_date.unwrap_or(today);

        (start, end)
    }
}

/// Summarize the transactions in the queried window per truck.
///
/// Fetches the raw rows and the truck list once, then folds the rows into
/// the summary.
///
/// # Errors
/// This function will return an [Error::SqlError] if either query fails.
/// Referential gaps in the data are not errors; see [build_summary].
pub fn summarize(
    query: &SummaryQuery,
    connection: &Connection,
) -> Result<TransactionSummary, Error> {
    let (start_date, end_date) = query.window_or_default(OffsetDateTime::now_utc().date());

    let rows = get_grouped_truck_transactions(start_date, end_date, connection)?;
    let trucks = get_trucks(connection)?;

    Ok(build_summary(&rows, &trucks))
}

/// Fold raw rows into per-truck totals, skipping rows whose truck id is not
/// in the truck list.
pub fn build_summary(rows: &[GroupedRow], trucks: &[Truck]) -> TransactionSummary {
    let names: HashMap<_, _> = trucks
        .iter()
        .map(|truck| (truck.id, truck.name.as_str()))
        .collect();

    let mut summary = TransactionSummary::new();

    for row in rows {
        let Some(&name) = names.get(&row.truck_id) else {
            tracing::warn!("truck id {} not found", row.truck_id);
            continue;
        };

        let totals = summary.entry(name.to_owned()).or_insert(TruckTotals {
            cost: 0.0,
            selling_price: 0.0,
        });
        totals.cost += row.cost;
        totals.selling_price += row.selling_price;
    }

    summary
}
