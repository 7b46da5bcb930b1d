//! Truck transaction management for the trucking ledger.
//!
//! This module contains everything related to truck transactions:
//! - The `TruckTransaction` model and the database functions for storing and
//!   querying transactions
//! - The command side ([command]) that resolves customer references before
//!   any write
//! - The table views ([table]) with their selection-gated row actions
//! - The JSON endpoints for creating, editing and querying transactions

pub mod command;
pub mod table;

mod additional;
mod additional_endpoint;
pub(crate) mod core;
mod create_endpoint;
mod edit_endpoint;
mod query_endpoints;

pub use additional::{
    AdditionalTransactionForm, AdditionalTruckTransaction, create_additional_transaction_table,
    create_additional_truck_transaction, get_misc_truck_transactions_by_truck_id,
};
pub use additional_endpoint::create_misc_transaction_endpoint;
pub use core::{
    CustomerRef, GroupedRow, TruckTransaction, TruckTransactionPayload,
    create_truck_transaction_table, get_grouped_truck_transactions, get_truck_transaction,
    get_truck_transaction_auto_complete, get_truck_transactions, mark_printed,
};
pub use create_endpoint::create_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use query_endpoints::{
    get_auto_complete_endpoint, get_misc_transactions_by_truck_endpoint,
    get_transactions_by_customer_endpoint, get_transactions_by_truck_endpoint,
    get_transactions_endpoint,
};
