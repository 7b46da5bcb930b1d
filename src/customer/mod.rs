//! Customer management for the trucking ledger.
//!
//! Customers are looked up by their `initial`, the short human-assigned code
//! entered on transaction forms. The lookup is the basis for customer
//! resolution in [crate::transaction::command].

mod core;
mod create_endpoint;

pub use core::{Customer, create_customer, create_customer_table, get_customer_by_initial};
pub use create_endpoint::create_customer_endpoint;
