use crate::models::{Invoice, LineItem};

/// Derived money figures for one invoice. Values stay unrounded; rounding
/// happens only when an amount is formatted for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Single source of truth for invoice arithmetic. The dashboard summary, the
/// advisory context and the document projection all go through here.
///
/// `discount` is an absolute amount subtracted after tax and is deliberately
/// not clamped, so the total can go negative.
pub fn compute_totals(items: &[LineItem], tax_rate: f64, discount: f64) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(|item| item.quantity * item.price).sum();
    let tax_amount = subtotal * (tax_rate / 100.0);
    InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount - discount,
    }
}

pub fn invoice_totals(invoice: &Invoice) -> InvoiceTotals {
    compute_totals(&invoice.items, invoice.tax_rate, invoice.discount)
}
