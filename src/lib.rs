pub mod document;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;
pub mod totals;
pub mod utils;

pub use models::{
    ChatMessage, ChatRole, CompanySettings, CompanySettingsPatch, Invoice, InvoiceStatus,
    Language, LedgerState, LineItem, Product, TextDirection, Theme,
};
pub use store::{Ledger, StoreError};
pub use totals::{compute_totals, invoice_totals, InvoiceTotals};

use tracing_subscriber::EnvFilter;

/// Installs a global tracing subscriber reading `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
