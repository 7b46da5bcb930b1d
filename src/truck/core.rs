//! Defines the truck model and its database queries.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TruckId};

/// A truck in the fleet. Transactions reference trucks by [Truck::id].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// The ID of the truck.
    pub id: TruckId,
    /// The display name of the truck, e.g. a plate number.
    pub name: String,
}

/// Create a new truck in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_truck(name: &str, connection: &Connection) -> Result<Truck, Error> {
    let truck = connection
        .prepare("INSERT INTO truck (name) VALUES (?1) RETURNING id, name")?
        .query_row([name], map_truck_row)?;

    Ok(truck)
}

/// Retrieve the full truck list.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_trucks(connection: &Connection) -> Result<Vec<Truck>, Error> {
    let trucks = connection
        .prepare("SELECT id, name FROM truck ORDER BY id")?
        .query_map([], map_truck_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(trucks)
}

/// Create the truck table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_truck_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS truck (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_truck_row(row: &Row) -> Result<Truck, rusqlite::Error> {
    Ok(Truck {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
