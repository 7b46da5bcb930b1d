//! The print coordinator and the boundary contract it speaks.

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TransactionId};

/// The generic retry message shown to users for any print failure.
///
/// The workflow deliberately does not distinguish transport failures from
/// business rejections; the underlying reason is only logged.
pub const RETRY_MESSAGE: &str = "Mohon coba kembali";

/// The kind of document to print for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A receipt.
    Bon,
    /// An invoice.
    Tagihan,
}

/// The status reported by a print boundary.
///
/// Older print services signal outcomes with a bare status string; use
/// [PrintStatus::from_legacy_signal] at that seam so the rest of the workflow
/// can branch on an explicit variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStatus {
    /// Every requested document was produced and flagged as printed.
    Success,
    /// The print request did not (fully) succeed; the payload describes why
    /// for the server logs.
    Failure(String),
}

impl PrintStatus {
    /// The exact status string legacy print services use to signal success.
    pub const LEGACY_SUCCESS_SIGNAL: &str = "Print Success";

    /// Interpret a legacy status string. Only the exact success signal counts
    /// as success; anything else, including different casing, is a failure.
    pub fn from_legacy_signal(signal: &str) -> Self {
        if signal == Self::LEGACY_SUCCESS_SIGNAL {
            PrintStatus::Success
        } else {
            PrintStatus::Failure(signal.to_owned())
        }
    }
}

/// The boundary that produces printable documents.
///
/// Implementations are responsible for producing the artifact and for setting
/// the matching printed flag (`is_printed_bon` for [DocumentKind::Bon],
/// `is_printed_invoice` for [DocumentKind::Tagihan]) on each transaction.
pub trait PrintBoundary {
    /// Print a document of `kind` for each of the given transactions.
    fn print(&self, transaction_ids: &[TransactionId], kind: DocumentKind) -> PrintStatus;
}

/// Request printing of `kind` documents for the given transactions and
/// interpret the boundary's answer.
///
/// Both single-row prints and batch prints of the current selection go
/// through here; the coordinator holds no state between calls.
///
/// # Errors
/// This function will return a:
/// - [Error::NothingToPrint] if `transaction_ids` is empty,
/// - or [Error::PrintFailed] for any boundary status other than success.
pub fn print_transactions(
    boundary: &dyn PrintBoundary,
    transaction_ids: &[TransactionId],
    kind: DocumentKind,
) -> Result<(), Error> {
    if transaction_ids.is_empty() {
        return Err(Error::NothingToPrint);
    }

    match boundary.print(transaction_ids, kind) {
        PrintStatus::Success => Ok(()),
        PrintStatus::Failure(reason) => Err(Error::PrintFailed(reason)),
    }
}
