//! Additional (misc) truck transactions: per-truck costs that are not
//! hauling jobs, e.g. repairs or levies. They carry no customer reference
//! and no print state.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{TransactionId, TruckId},
};

/// A cost booked against a truck outside of a hauling job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalTruckTransaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the cost was incurred.
    pub date: Date,
    /// What the cost was for.
    pub details: String,
    /// The amount. Never negative.
    pub cost: f64,
    /// The truck the cost is booked against.
    pub truck_id: TruckId,
}

/// The request body for booking an additional truck transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalTransactionForm {
    /// When the cost was incurred.
    pub date: Date,
    /// What the cost was for.
    pub details: String,
    /// The amount.
    pub cost: f64,
    /// The truck the cost is booked against.
    pub truck_id: TruckId,
}

/// Create a new additional truck transaction in the database.
///
/// Unlike hauling jobs there is no customer to resolve, so the form goes
/// straight to the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the cost is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_additional_truck_transaction(
    form: &AdditionalTransactionForm,
    connection: &Connection,
) -> Result<AdditionalTruckTransaction, Error> {
    if form.cost < 0.0 {
        return Err(Error::NegativeAmount {
            field: "cost",
            value: form.cost,
        });
    }

    let transaction = connection
        .prepare(
            "INSERT INTO additional_transaction (date, details, cost, truck_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, date, details, cost, truck_id",
        )?
        .query_row(
            params![form.date, form.details, form.cost, form.truck_id],
            map_additional_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve the additional transactions booked against a truck, oldest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_misc_truck_transactions_by_truck_id(
    truck_id: TruckId,
    connection: &Connection,
) -> Result<Vec<AdditionalTruckTransaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, date, details, cost, truck_id FROM additional_transaction
             WHERE truck_id = ?1 ORDER BY date, id",
        )?
        .query_map([truck_id], map_additional_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Create the additional transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_additional_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS additional_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                details TEXT NOT NULL,
                cost REAL NOT NULL,
                truck_id INTEGER NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_additional_transaction_row(
    row: &Row,
) -> Result<AdditionalTruckTransaction, rusqlite::Error> {
    Ok(AdditionalTruckTransaction {
        id: row.get(0)?,
        date: row.get(1)?,
        details: row.get(2)?,
        cost: row.get(3)?,
        truck_id: row.get(4)?,
    })
}
