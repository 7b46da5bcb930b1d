//! The bon/tagihan print workflow.
//!
//! This module coordinates print requests; producing the actual document is
//! the job of whatever sits behind [PrintBoundary]. The coordinator only
//! interprets the boundary's status: success, or one generic retry failure.

pub(crate) mod core;
mod print_endpoint;
mod sqlite_printer;

pub use core::{DocumentKind, PrintBoundary, PrintStatus, RETRY_MESSAGE, print_transactions};
pub use print_endpoint::print_endpoint;
pub use sqlite_printer::SqlitePrinter;
