//! Truck (fleet) management for the trucking ledger.

mod core;
mod create_endpoint;

pub use core::{Truck, create_truck, create_truck_table, get_trucks};
pub use create_endpoint::create_truck_endpoint;
