//! Defines the core data models and database queries for truck transactions.

use std::collections::HashMap;

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    Error,
    database_id::{CustomerId, TransactionId, TruckId},
    print::DocumentKind,
};

/// How long after creation a transaction stays editable by regular users.
const EDIT_WINDOW: Duration = Duration::days(1);

// ============================================================================
// MODELS
// ============================================================================

/// The resolved reference from a transaction to its customer.
///
/// Transactions never store the raw initial string a user typed; payloads are
/// resolved to this structured form before any persistence call (see
/// [crate::transaction::command]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    /// The ID of the customer.
    pub customer_id: CustomerId,
    /// The customer's initial code at the time of resolution.
    pub initial: String,
}

/// A single hauling job: one container moved for one customer by one truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckTransaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the job happened.
    pub date: Date,
    /// The shipping container number.
    pub container_no: String,
    /// The invoice number issued for the job.
    pub invoice_no: String,
    /// The delivery destination.
    pub destination: String,
    /// What the job cost the business. Never negative.
    pub cost: f64,
    /// What the customer is charged. Never negative.
    pub selling_price: f64,
    /// Income recorded for the job. Falls back to the selling price when
    /// absent; use [TruckTransaction::effective_income] when displaying.
    pub income: Option<f64>,
    /// The withholding-tax amount recorded for the job.
    pub pph: f64,
    /// The resolved customer reference.
    pub customer: CustomerRef,
    /// The receipt (bon) reference.
    pub bon: String,
    /// Free-form additional information.
    pub details: String,
    /// The truck that carried out the job.
    pub truck_id: TruckId,
    /// Whether a bon document has been printed for this transaction.
    /// Set-only from the print workflow's perspective.
    pub is_printed_bon: bool,
    /// Whether a tagihan (invoice) document has been printed.
    pub is_printed_invoice: bool,
    /// Until when regular users may edit this transaction.
    #[serde(with = "time::serde::rfc3339")]
    pub editable_by_user_until: OffsetDateTime,
}

impl TruckTransaction {
    /// The income to display and report: the recorded income, or the selling
    /// price when no income was recorded.
    pub fn effective_income(&self) -> f64 {
        self.income.unwrap_or(self.selling_price)
    }
}

/// A transaction payload whose customer reference has been resolved.
///
/// This is the only form the persistence layer accepts; construct it via
/// [crate::transaction::command::resolve_payload].
#[derive(Debug, Clone, PartialEq)]
pub struct TruckTransactionPayload {
    /// When the job happened.
    pub date: Date,
    /// The shipping container number.
    pub container_no: String,
    /// The invoice number issued for the job.
    pub invoice_no: String,
    /// The delivery destination.
    pub destination: String,
    /// What the job cost the business.
    pub cost: f64,
    /// What the customer is charged.
    pub selling_price: f64,
    /// Income recorded for the job, if different from the selling price.
    pub income: Option<f64>,
    /// The withholding-tax amount.
    pub pph: f64,
    /// The resolved customer reference.
    pub customer: CustomerRef,
    /// The receipt (bon) reference.
    pub bon: String,
    /// Free-form additional information.
    pub details: String,
    /// The truck that carried out the job.
    pub truck_id: TruckId,
}

/// One raw row of the grouped report query: the fields the aggregator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedRow {
    /// The truck the row belongs to.
    pub truck_id: TruckId,
    /// The row's cost.
    pub cost: f64,
    /// The row's selling price.
    pub selling_price: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_COLUMNS: &str = "id, date, container_no, invoice_no, destination, cost, \
     selling_price, income, pph, customer_id, customer_initial, bon, details, truck_id, \
     is_printed_bon, is_printed_invoice, editable_by_user_until";

/// Create a new truck transaction in the database from a resolved payload.
///
/// The printed flags start out false and the user-edit deadline is set from
/// the creation time.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the cost or selling price is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_truck_transaction(
    payload: &TruckTransactionPayload,
    connection: &Connection,
) -> Result<TruckTransaction, Error> {
    check_non_negative("cost", payload.cost)?;
    check_non_negative("sellingPrice", payload.selling_price)?;

    let editable_by_user_until = OffsetDateTime::now_utc() + EDIT_WINDOW;

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO truck_transaction (date, container_no, invoice_no, destination, cost, \
             selling_price, income, pph, customer_id, customer_initial, bon, details, truck_id, \
             is_printed_bon, is_printed_invoice, editable_by_user_until)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, 0, 0, ?14)
             RETURNING {SELECT_COLUMNS}"
        ))?
        .query_row(
            params![
                payload.date,
                payload.container_no,
                payload.invoice_no,
                payload.destination,
                payload.cost,
                payload.selling_price,
                payload.income,
                payload.pph,
                payload.customer.customer_id,
                payload.customer.initial,
                payload.bon,
                payload.details,
                payload.truck_id,
                editable_by_user_until,
            ],
            map_truck_transaction_row,
        )?;

    Ok(transaction)
}

/// Overwrite the payload fields of an existing transaction.
///
/// The printed flags and the user-edit deadline are left untouched; the print
/// workflow owns the former and creation time owns the latter.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the cost or selling price is negative,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a stored
///   transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn edit_truck_transaction(
    id: TransactionId,
    payload: &TruckTransactionPayload,
    connection: &Connection,
) -> Result<TruckTransaction, Error> {
    check_non_negative("cost", payload.cost)?;
    check_non_negative("sellingPrice", payload.selling_price)?;

    let updated = connection.execute(
        "UPDATE truck_transaction
         SET date = ?1, container_no = ?2, invoice_no = ?3, destination = ?4, cost = ?5,
             selling_price = ?6, income = ?7, pph = ?8, customer_id = ?9, customer_initial = ?10,
             bon = ?11, details = ?12, truck_id = ?13
         WHERE id = ?14",
        params![
            payload.date,
            payload.container_no,
            payload.invoice_no,
            payload.destination,
            payload.cost,
            payload.selling_price,
            payload.income,
            payload.pph,
            payload.customer.customer_id,
            payload.customer.initial,
            payload.bon,
            payload.details,
            payload.truck_id,
            id,
        ],
    )?;

    if updated == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    get_truck_transaction(id, connection)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_truck_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<TruckTransaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM truck_transaction WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_truck_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all truck transactions, oldest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_truck_transactions(connection: &Connection) -> Result<Vec<TruckTransaction>, Error> {
    query_transactions(
        &format!("SELECT {SELECT_COLUMNS} FROM truck_transaction ORDER BY date, id"),
        params![],
        connection,
    )
}

/// Retrieve the truck transactions belonging to a customer.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_truck_transactions_by_customer_id(
    customer_id: CustomerId,
    connection: &Connection,
) -> Result<Vec<TruckTransaction>, Error> {
    query_transactions(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM truck_transaction
             WHERE customer_id = ?1 ORDER BY date, id"
        ),
        params![customer_id],
        connection,
    )
}

/// Retrieve the truck transactions carried out by a truck.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_truck_transactions_by_truck_id(
    truck_id: TruckId,
    connection: &Connection,
) -> Result<Vec<TruckTransaction>, Error> {
    query_transactions(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM truck_transaction
             WHERE truck_id = ?1 ORDER BY date, id"
        ),
        params![truck_id],
        connection,
    )
}

/// Retrieve the raw rows the per-truck summary report aggregates over.
///
/// The window bounds are inclusive.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_grouped_truck_transactions(
    start_date: Date,
    end_date: Date,
    connection: &Connection,
) -> Result<Vec<GroupedRow>, Error> {
    let rows = connection
        .prepare(
            "SELECT truck_id, cost, selling_price FROM truck_transaction
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date, id",
        )?
        .query_map(params![start_date, end_date], |row| {
            Ok(GroupedRow {
                truck_id: row.get(0)?,
                cost: row.get(1)?,
                selling_price: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Collect the distinct values previously entered in free-text form fields,
/// keyed by field name.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_truck_transaction_auto_complete(
    connection: &Connection,
) -> Result<HashMap<String, Vec<String>>, Error> {
    let mut auto_complete = HashMap::new();

    for (field, column) in [("destination", "destination"), ("details", "details")] {
        let values = connection
            .prepare(&format!(
                "SELECT DISTINCT {column} FROM truck_transaction
                 WHERE {column} <> '' ORDER BY {column}"
            ))?
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        auto_complete.insert(field.to_owned(), values);
    }

    Ok(auto_complete)
}

/// Set the printed flag for `kind` on each of the given transactions.
///
/// Flags are only ever set, never cleared. Returns the number of rows that
/// were actually updated, which is less than `ids.len()` when some ids do not
/// exist.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn mark_printed(
    ids: &[TransactionId],
    kind: DocumentKind,
    connection: &Connection,
) -> Result<usize, Error> {
    let column = match kind {
        DocumentKind::Bon => "is_printed_bon",
        DocumentKind::Tagihan => "is_printed_invoice",
    };

    let mut statement = connection.prepare(&format!(
        "UPDATE truck_transaction SET {column} = 1 WHERE id = ?1"
    ))?;

    let mut updated = 0;
    for id in ids {
        updated += statement.execute([id])?;
    }

    Ok(updated)
}

/// Create the truck transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_truck_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS truck_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                container_no TEXT NOT NULL,
                invoice_no TEXT NOT NULL,
                destination TEXT NOT NULL,
                cost REAL NOT NULL,
                selling_price REAL NOT NULL,
                income REAL,
                pph REAL NOT NULL,
                customer_id INTEGER NOT NULL,
                customer_initial TEXT NOT NULL,
                bon TEXT NOT NULL,
                details TEXT NOT NULL,
                truck_id INTEGER NOT NULL,
                is_printed_bon INTEGER NOT NULL DEFAULT 0,
                is_printed_invoice INTEGER NOT NULL DEFAULT 0,
                editable_by_user_until TEXT NOT NULL
                )",
        (),
    )?;

    // Composite index used by the summary report's window query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_truck_transaction_date_truck
         ON truck_transaction(date, truck_id);",
        (),
    )?;

    Ok(())
}

fn query_transactions(
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    connection: &Connection,
) -> Result<Vec<TruckTransaction>, Error> {
    let transactions = connection
        .prepare(sql)?
        .query_map(params, map_truck_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), Error> {
    if value < 0.0 {
        return Err(Error::NegativeAmount { field, value });
    }

    Ok(())
}

/// Map a database row to a [TruckTransaction].
fn map_truck_transaction_row(row: &Row) -> Result<TruckTransaction, rusqlite::Error> {
    Ok(TruckTransaction {
        id: row.get(0)?,
        date: row.get(1)?,
        container_no: row.get(2)?,
        invoice_no: row.get(3)?,
        destination: row.get(4)?,
        cost: row.get(5)?,
        selling_price: row.get(6)?,
        income: row.get(7)?,
        pph: row.get(8)?,
        customer: CustomerRef {
            customer_id: row.get(9)?,
            initial: row.get(10)?,
        },
        bon: row.get(11)?,
        details: row.get(12)?,
        truck_id: row.get(13)?,
        is_printed_bon: row.get(14)?,
        is_printed_invoice: row.get(15)?,
        editable_by_user_until: row.get(16)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod test_utils {
    use rusqlite::Connection;
    use time::Date;

    use crate::{
        db::initialize,
        transaction::core::{
            CustomerRef, TruckTransaction, TruckTransactionPayload, create_truck_transaction,
        },
    };

    pub fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    pub fn sample_payload(date: Date, truck_id: i64) -> TruckTransactionPayload {
        TruckTransactionPayload {
            date,
            container_no: "TEMU1234567".to_owned(),
            invoice_no: "INV-1".to_owned(),
            destination: "Tanjung Priok".to_owned(),
            cost: 100.0,
            selling_price: 150.0,
            income: None,
            pph: 0.0,
            customer: CustomerRef {
                customer_id: 1,
                initial: "SKM".to_owned(),
            },
            bon: "B-1".to_owned(),
            details: String::new(),
            truck_id,
        }
    }

    pub fn insert_sample(date: Date, truck_id: i64, conn: &Connection) -> TruckTransaction {
        create_truck_transaction(&sample_payload(date, truck_id), conn)
            .expect("Could not create transaction")
    }
}

#[cfg(test)]
mod database_tests {
    use time::macros::date;

    use crate::{
        Error,
        print::DocumentKind,
        transaction::core::{
            edit_truck_transaction, get_grouped_truck_transactions, get_truck_transaction,
            get_truck_transaction_auto_complete, get_truck_transactions,
            get_truck_transactions_by_customer_id, get_truck_transactions_by_truck_id,
            mark_printed,
            test_utils::{get_test_connection, insert_sample, sample_payload},
        },
    };

    #[test]
    fn create_succeeds_and_starts_unprinted() {
        let conn = get_test_connection();

        let transaction = insert_sample(date!(2025 - 06 - 10), 1, &conn);

        assert_eq!(transaction.cost, 100.0);
        assert_eq!(transaction.selling_price, 150.0);
        assert!(!transaction.is_printed_bon);
        assert!(!transaction.is_printed_invoice);
        assert_eq!(transaction.customer.initial, "SKM");
    }

    #[test]
    fn create_rejects_negative_cost() {
        let conn = get_test_connection();
        let mut payload = sample_payload(date!(2025 - 06 - 10), 1);
        payload.cost = -5.0;

        let result = crate::transaction::core::create_truck_transaction(&payload, &conn);

        assert_eq!(
            result,
            Err(Error::NegativeAmount {
                field: "cost",
                value: -5.0
            })
        );
    }

    #[test]
    fn edit_overwrites_payload_fields_only() {
        let conn = get_test_connection();
        let created = insert_sample(date!(2025 - 06 - 10), 1, &conn);
        mark_printed(&[created.id], DocumentKind::Bon, &conn).unwrap();

        let mut payload = sample_payload(date!(2025 - 06 - 11), 2);
        payload.destination = "Surabaya".to_owned();
        let edited = edit_truck_transaction(created.id, &payload, &conn).unwrap();

        assert_eq!(edited.destination, "Surabaya");
        assert_eq!(edited.truck_id, 2);
        // The print flag set between create and edit must survive the edit.
        assert!(edited.is_printed_bon);
        assert_eq!(
            edited.editable_by_user_until,
            created.editable_by_user_until
        );
    }

    #[test]
    fn edit_missing_transaction_fails() {
        let conn = get_test_connection();
        let payload = sample_payload(date!(2025 - 06 - 10), 1);

        let result = edit_truck_transaction(99, &payload, &conn);

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn queries_filter_by_customer_and_truck() {
        let conn = get_test_connection();
        insert_sample(date!(2025 - 06 - 10), 1, &conn);
        insert_sample(date!(2025 - 06 - 11), 2, &conn);

        assert_eq!(get_truck_transactions(&conn).unwrap().len(), 2);
        assert_eq!(
            get_truck_transactions_by_truck_id(1, &conn).unwrap().len(),
            1
        );
        assert_eq!(
            get_truck_transactions_by_customer_id(1, &conn)
                .unwrap()
                .len(),
            2
        );
        assert!(
            get_truck_transactions_by_customer_id(42, &conn)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn grouped_rows_respect_the_date_window() {
        let conn = get_test_connection();
        insert_sample(date!(2025 - 05 - 31), 1, &conn);
        insert_sample(date!(2025 - 06 - 01), 1, &conn);
        insert_sample(date!(2025 - 06 - 30), 2, &conn);
        insert_sample(date!(2025 - 07 - 01), 2, &conn);

        let rows =
            get_grouped_truck_transactions(date!(2025 - 06 - 01), date!(2025 - 06 - 30), &conn)
                .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].truck_id, 1);
        assert_eq!(rows[1].truck_id, 2);
    }

    #[test]
    fn mark_printed_sets_only_the_requested_flag() {
        let conn = get_test_connection();
        let first = insert_sample(date!(2025 - 06 - 10), 1, &conn);
        let second = insert_sample(date!(2025 - 06 - 11), 1, &conn);

        let updated = mark_printed(&[first.id, second.id], DocumentKind::Tagihan, &conn).unwrap();

        assert_eq!(updated, 2);
        for id in [first.id, second.id] {
            let transaction = get_truck_transaction(id, &conn).unwrap();
            assert!(transaction.is_printed_invoice);
            assert!(!transaction.is_printed_bon);
        }
    }

    #[test]
    fn mark_printed_reports_missing_ids_through_the_count() {
        let conn = get_test_connection();
        let transaction = insert_sample(date!(2025 - 06 - 10), 1, &conn);

        let updated = mark_printed(&[transaction.id, 999], DocumentKind::Bon, &conn).unwrap();

        assert_eq!(updated, 1);
    }

    #[test]
    fn auto_complete_lists_distinct_non_empty_values() {
        let conn = get_test_connection();
        insert_sample(date!(2025 - 06 - 10), 1, &conn);
        insert_sample(date!(2025 - 06 - 11), 1, &conn);

        let auto_complete = get_truck_transaction_auto_complete(&conn).unwrap();

        assert_eq!(
            auto_complete["destination"],
            vec!["Tanjung Priok".to_owned()]
        );
        // Details are empty strings in the samples, so nothing is suggested.
        assert!(auto_complete["details"].is_empty());
    }
}
