//! Database initialization for the ledger.

use rusqlite::Connection;

use crate::{
    Error, customer::create_customer_table, transaction::create_additional_transaction_table,
    transaction::create_truck_transaction_table, truck::create_truck_table,
};

/// Create the tables for all of the app's domain models.
///
/// Safe to call on an existing database; the table definitions use
/// `IF NOT EXISTS`.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_customer_table(connection)?;
    create_truck_table(connection)?;
    create_truck_transaction_table(connection)?;
    create_additional_transaction_table(connection)?;

    Ok(())
}
