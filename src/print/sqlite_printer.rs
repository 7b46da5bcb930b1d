//! The print boundary backed by the application's SQLite database.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    database_id::TransactionId,
    print::core::{DocumentKind, PrintBoundary, PrintStatus},
    transaction::mark_printed,
};

/// A [PrintBoundary] that records print state in the ledger database.
///
/// Document rendering happens downstream of the printed flag; this boundary
/// considers a request successful once every requested transaction is
/// flagged.
#[derive(Debug, Clone)]
pub struct SqlitePrinter {
    db_connection: Arc<Mutex<Connection>>,
}

impl SqlitePrinter {
    /// Create a printer that flags transactions in the given database.
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }
}

impl PrintBoundary for SqlitePrinter {
    fn print(&self, transaction_ids: &[TransactionId], kind: DocumentKind) -> PrintStatus {
        let connection = match self.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => return PrintStatus::Failure(error.to_string()),
        };

        match mark_printed(transaction_ids, kind, &connection) {
            Ok(updated) if updated == transaction_ids.len() => PrintStatus::Success,
            Ok(updated) => PrintStatus::Failure(format!(
                "only {updated} of {} transactions could be flagged as printed",
                transaction_ids.len()
            )),
            Err(error) => PrintStatus::Failure(error.to_string()),
        }
    }
}
