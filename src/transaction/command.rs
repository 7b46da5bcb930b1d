//! The command side of transaction management: customer resolution followed
//! by delegation to the persistence layer.
//!
//! The only validation performed here is customer existence. Everything else
//! (non-negative amounts, row existence on edit) is deliberately left to the
//! persistence layer.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    customer::get_customer_by_initial,
    database_id::{TransactionId, TruckId},
    transaction::core::{
        CustomerRef, TruckTransaction, TruckTransactionPayload, create_truck_transaction,
        edit_truck_transaction,
    },
};

/// The wire form of a truck transaction: the customer field is the raw
/// initial string the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckTransactionForm {
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
    #[serde(default)]
    pub income: Option<f64>,
    /// The withholding-tax amount.
    #[serde(default)]
    pub pph: f64,
    /// The customer's initial code, resolved before persistence.
    pub customer: String,
    /// The receipt (bon) reference.
    #[serde(default)]
    pub bon: String,
    /// Free-form additional information.
    #[serde(default)]
    pub details: String,
    /// The truck that carried out the job.
    pub truck_id: TruckId,
}

/// Resolve the raw customer initial on `form` into a structured reference.
///
/// This is the gate every write goes through: a payload with an unknown
/// customer never reaches the database.
///
/// # Errors
/// This function will return a:
/// - [Error::CustomerNotRegistered] if the initial does not match a
///   registered customer,
/// - or [Error::SqlError] if the lookup itself fails.
pub fn resolve_payload(
    form: TruckTransactionForm,
    connection: &Connection,
) -> Result<TruckTransactionPayload, Error> {
    let customer = get_customer_by_initial(&form.customer, connection)?
        .ok_or(Error::CustomerNotRegistered)?;

    Ok(TruckTransactionPayload {
        date: form.date,
        container_no: form.container_no,
        invoice_no: form.invoice_no,
        destination: form.destination,
        cost: form.cost,
        selling_price: form.selling_price,
        income: form.income,
        pph: form.pph,
        customer: CustomerRef {
            customer_id: customer.id,
            initial: customer.initial,
        },
        bon: form.bon,
        details: form.details,
        truck_id: form.truck_id,
    })
}

/// Record a new truck transaction after resolving its customer reference.
///
/// # Errors
/// Propagates [Error::CustomerNotRegistered] from resolution and any error
/// from the persistence layer unchanged.
pub fn create_transaction(
    form: TruckTransactionForm,
    connection: &Connection,
) -> Result<TruckTransaction, Error> {
    let payload = resolve_payload(form, connection)?;

    create_truck_transaction(&payload, connection)
}

/// Overwrite an existing truck transaction after re-resolving its customer
/// reference.
///
/// # Errors
/// Propagates [Error::CustomerNotRegistered] from resolution and any error
/// from the persistence layer unchanged.
pub fn edit_transaction(
    id: TransactionId,
    form: TruckTransactionForm,
    connection: &Connection,
) -> Result<TruckTransaction, Error> {
    let payload = resolve_payload(form, connection)?;

    edit_truck_transaction(id, &payload, connection)
}
