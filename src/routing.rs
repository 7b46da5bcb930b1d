//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    customer::create_customer_endpoint,
    endpoints,
    print::print_endpoint,
    report::get_summary_endpoint,
    transaction::{
        create_misc_transaction_endpoint, create_transaction_endpoint, edit_transaction_endpoint,
        get_auto_complete_endpoint, get_misc_transactions_by_truck_endpoint,
        get_transactions_by_customer_endpoint, get_transactions_by_truck_endpoint,
        get_transactions_endpoint,
    },
    truck::create_truck_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, put(edit_transaction_endpoint))
        .route(
            endpoints::TRANSACTIONS_BY_CUSTOMER,
            get(get_transactions_by_customer_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_BY_TRUCK,
            get(get_transactions_by_truck_endpoint),
        )
        .route(
            endpoints::MISC_TRANSACTIONS_BY_TRUCK,
            get(get_misc_transactions_by_truck_endpoint),
        )
        .route(
            endpoints::MISC_TRANSACTIONS_API,
            post(create_misc_transaction_endpoint),
        )
        .route(endpoints::AUTOCOMPLETE_API, get(get_auto_complete_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(endpoints::PRINT_API, post(print_endpoint))
        .route(endpoints::CUSTOMERS_API, post(create_customer_endpoint))
        .route(endpoints::TRUCKS_API, post(create_truck_endpoint))
        .with_state(state)
}
