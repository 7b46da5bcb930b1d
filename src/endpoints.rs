//! The API endpoint URIs.

/// The route to create and list truck transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update a single truck transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list the truck transactions for a customer.
pub const TRANSACTIONS_BY_CUSTOMER: &str = "/api/customers/{customer_id}/transactions";
/// The route to list the truck transactions for a truck.
pub const TRANSACTIONS_BY_TRUCK: &str = "/api/trucks/{truck_id}/transactions";
/// The route to list the additional (misc) transactions for a truck.
pub const MISC_TRANSACTIONS_BY_TRUCK: &str = "/api/trucks/{truck_id}/misc-transactions";
/// The route to create an additional (misc) truck transaction.
pub const MISC_TRANSACTIONS_API: &str = "/api/misc-transactions";
/// The route for transaction form autocomplete data.
pub const AUTOCOMPLETE_API: &str = "/api/autocomplete";
/// The route for the per-truck cost/revenue summary report.
pub const SUMMARY_API: &str = "/api/reports/summary";
/// The route to request printing of bon/tagihan documents.
pub const PRINT_API: &str = "/api/print";
/// The route to register a customer.
pub const CUSTOMERS_API: &str = "/api/customers";
/// The route to register a truck.
pub const TRUCKS_API: &str = "/api/trucks";
