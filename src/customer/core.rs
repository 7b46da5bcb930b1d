//! Defines the customer model and its database queries.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CustomerId};

/// A freight customer, identified on forms by its short `initial` code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// The ID of the customer.
    pub id: CustomerId,
    /// The short human-assigned code used as the lookup key, e.g. "SKM".
    pub initial: String,
}

/// Create a new customer in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCustomerInitial] if a customer with the same initial
///   already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_customer(initial: &str, connection: &Connection) -> Result<Customer, Error> {
    connection
        .prepare("INSERT INTO customer (initial) VALUES (?1) RETURNING id, initial")?
        .query_row([initial], map_customer_row)
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateCustomerInitial(initial.to_owned()),
            error => error.into(),
        })
}

/// Look up a customer by its initial code.
///
/// Returns `None` when no customer is registered under `initial`; it is the
/// caller's decision whether that is an error.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_customer_by_initial(
    initial: &str,
    connection: &Connection,
) -> Result<Option<Customer>, Error> {
    let customer = connection
        .prepare("SELECT id, initial FROM customer WHERE initial = :initial")?
        .query_row(&[(":initial", &initial)], map_customer_row)
        .optional()?;

    Ok(customer)
}

/// Create the customer table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                initial TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

fn map_customer_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        initial: row.get(1)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        customer::{create_customer, get_customer_by_initial},
        db::initialize,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let customer = create_customer("SKM", &conn).expect("Could not create customer");

        assert_eq!(customer.initial, "SKM");
    }

    #[test]
    fn create_fails_on_duplicate_initial() {
        let conn = get_test_connection();
        create_customer("SKM", &conn).expect("Could not create customer");

        let duplicate = create_customer("SKM", &conn);

        assert_eq!(
            duplicate,
            Err(Error::DuplicateCustomerInitial("SKM".to_owned()))
        );
    }

    #[test]
    fn get_by_initial_finds_registered_customer() {
        let conn = get_test_connection();
        let created = create_customer("ABC", &conn).unwrap();

        let found = get_customer_by_initial("ABC", &conn).expect("Lookup failed");

        assert_eq!(found, Some(created));
    }

    #[test]
    fn get_by_initial_returns_none_for_unknown_code() {
        let conn = get_test_connection();

        let found = get_customer_by_initial("ZZZ", &conn).expect("Lookup failed");

        assert_eq!(found, None);
    }
}
