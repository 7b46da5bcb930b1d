//! Table views over truck transactions.
//!
//! Rows are projected through an explicit allow-list of columns per view;
//! a view never builds a row by copying everything and deleting what it
//! wants hidden. The table also owns the row-selection state that gates the
//! edit/delete actions and feeds batch printing.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    database_id::TransactionId,
    print::{DocumentKind, PrintBoundary, print_transactions},
    selection::Selection,
    transaction::core::TruckTransaction,
};

/// A column of the transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// The transaction date, rendered dd/mm/yyyy.
    Date,
    /// The container number.
    ContainerNo,
    /// The invoice number.
    InvoiceNo,
    /// The destination.
    Destination,
    /// The cost, rendered as rupiah.
    Cost,
    /// The selling price (payment), rendered as rupiah.
    SellingPrice,
    /// The income, falling back to the selling price when absent.
    Income,
    /// The withholding-tax amount.
    Pph,
    /// The customer's initial code.
    Customer,
    /// The receipt reference.
    Bon,
    /// Free-form additional information.
    Details,
}

impl Column {
    /// The header label shown for this column.
    pub fn label(self) -> &'static str {
        match self {
            Column::Date => "Tanggal",
            Column::ContainerNo => "No. Container",
            Column::InvoiceNo => "No. Invoice",
            Column::Destination => "Tujuan",
            Column::Cost => "Borongan",
            Column::SellingPrice => "Pembayaran",
            Column::Income => "Pendapatan",
            Column::Pph => "PPH",
            Column::Customer => "EMKL",
            Column::Bon => "Bon",
            Column::Details => "Info Tambahan",
        }
    }
}

/// The columns shown to admins: everything.
pub const ADMIN_COLUMNS: &[Column] = &[
    Column::Date,
    Column::ContainerNo,
    Column::InvoiceNo,
    Column::Destination,
    Column::Cost,
    Column::SellingPrice,
    Column::Income,
    Column::Pph,
    Column::Customer,
    Column::Bon,
    Column::Details,
];

/// The columns shown to regular staff: the payment column is not visible.
pub const STAFF_COLUMNS: &[Column] = &[
    Column::Date,
    Column::ContainerNo,
    Column::InvoiceNo,
    Column::Destination,
    Column::Cost,
    Column::Income,
    Column::Pph,
    Column::Customer,
    Column::Bon,
    Column::Details,
];

/// Which actions are available on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    /// Whether the row may be edited. Disabled while the row is queued for
    /// batch printing.
    pub can_edit: bool,
    /// Whether the row may be deleted. Disabled while the row is queued for
    /// batch printing.
    pub can_delete: bool,
    /// Whether the single-row print buttons are shown. Depends only on the
    /// table being an EMKL view, never on selection.
    pub can_print_single: bool,
}

/// Footer totals over the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableTotals {
    /// Sum of the displayed rows' costs.
    pub cost: f64,
    /// Sum of the displayed rows' selling prices.
    pub selling_price: f64,
}

/// A transaction list together with its column set and selection state.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    rows: Vec<TruckTransaction>,
    columns: &'static [Column],
    selection: Selection,
    emkl: bool,
}

impl TransactionTable {
    /// Create a table over freshly loaded rows with an empty selection.
    ///
    /// `emkl` controls whether the per-row print actions are shown.
    pub fn new(rows: Vec<TruckTransaction>, columns: &'static [Column], emkl: bool) -> Self {
        Self {
            rows,
            columns,
            selection: Selection::new(),
            emkl,
        }
    }

    /// Replace the rows with a fresh load, discarding the selection.
    pub fn reload(&mut self, rows: Vec<TruckTransaction>) {
        self.rows = rows;
        self.selection = Selection::new();
    }

    /// The displayed rows, in table order.
    pub fn rows(&self) -> &[TruckTransaction] {
        &self.rows
    }

    /// Flip the batch-print selection of one row.
    pub fn toggle(&mut self, id: TransactionId) {
        self.selection.toggle(id);
    }

    /// Whether the given row is marked for batch printing.
    pub fn is_selected(&self, id: TransactionId) -> bool {
        self.selection.is_selected(id)
    }

    /// The actions available on the given row.
    pub fn row_actions(&self, id: TransactionId) -> RowActions {
        let selected = self.selection.is_selected(id);

        RowActions {
            can_edit: !selected,
            can_delete: !selected,
            can_print_single: self.emkl,
        }
    }

    /// The ids currently marked for batch printing, in row order.
    pub fn selected_ids(&self) -> Vec<TransactionId> {
        let row_order: Vec<TransactionId> = self.rows.iter().map(|row| row.id).collect();

        self.selection.ids_in_order(&row_order)
    }

    /// Print `kind` documents for the currently selected rows.
    ///
    /// The selection is intentionally kept after a successful print; it only
    /// goes away when the table is reloaded.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NothingToPrint] if no row is selected,
    /// - or [Error::PrintFailed] if the boundary reports anything but
    ///   success.
    pub fn print_selected(
        &self,
        boundary: &dyn PrintBoundary,
        kind: DocumentKind,
    ) -> Result<(), Error> {
        print_transactions(boundary, &self.selected_ids(), kind)
    }

    /// The header labels for the visible columns.
    pub fn header_labels(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.label()).collect()
    }

    /// Project one row into display cells, visible columns only.
    pub fn cells(&self, transaction: &TruckTransaction) -> Vec<String> {
        self.columns
            .iter()
            .map(|&column| format_cell(column, transaction))
            .collect()
    }

    /// Sum cost and selling price over all displayed rows for the footer.
    pub fn totals(&self) -> TableTotals {
        TableTotals {
            cost: self.rows.iter().map(|row| row.cost).sum(),
            selling_price: self.rows.iter().map(|row| row.selling_price).sum(),
        }
    }
}

const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero]/[month repr:numerical padding:zero]/[year]");

fn format_cell(column: Column, transaction: &TruckTransaction) -> String {
    match column {
        Column::Date => transaction
            .date
            .format(DATE_DISPLAY_FORMAT)
            .unwrap_or_else(|_| transaction.date.to_string()),
        Column::ContainerNo => transaction.container_no.clone(),
        Column::InvoiceNo => transaction.invoice_no.clone(),
        Column::Destination => transaction.destination.clone(),
        Column::Cost => rupiah(transaction.cost),
        Column::SellingPrice => rupiah(transaction.selling_price),
        Column::Income => rupiah(transaction.effective_income()),
        Column::Pph => rupiah(transaction.pph),
        Column::Customer => transaction.customer.initial.clone(),
        Column::Bon => transaction.bon.clone(),
        Column::Details => transaction.details.clone(),
    }
}

/// Format an amount as rupiah with thousands separators, e.g. `Rp1,250,000`.
pub fn rupiah(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("Rp")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-Rp")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    if amount < 0.0 {
        negative_fmt.fmt_string(amount.abs())
    } else if amount > 0.0 {
        positive_fmt.fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "Rp0".to_owned()
    }
}
