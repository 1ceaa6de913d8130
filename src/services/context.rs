use serde::Serialize;
use std::collections::HashSet;

use crate::models::{Invoice, InvoiceStatus, Product};
use crate::totals::invoice_totals;

/// Stock level below which a product counts as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Compact financial snapshot embedded in the advisory instruction payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialContext {
    pub total_revenue: f64,
    pub pending_invoices: usize,
    pub pending_amount: f64,
    pub total_invoices: usize,
    pub product_count: usize,
    pub low_stock_products: Vec<String>,
}

pub fn build_financial_context(invoices: &[Invoice], products: &[Product]) -> FinancialContext {
    let total_revenue = invoices.iter().map(|inv| invoice_totals(inv).total).sum();

    let pending: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Pending)
        .collect();
    let pending_amount = pending.iter().map(|inv| invoice_totals(inv).total).sum();

    FinancialContext {
        total_revenue,
        pending_invoices: pending.len(),
        pending_amount,
        total_invoices: invoices.len(),
        product_count: products.len(),
        low_stock_products: products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .map(|p| p.name.clone())
            .collect(),
    }
}

impl FinancialContext {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Headline figures for the dashboard, derived through the same calculator as
/// everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub pending_invoices: usize,
    pub active_clients: usize,
}

pub fn build_dashboard_summary(invoices: &[Invoice]) -> DashboardSummary {
    let clients: HashSet<&str> = invoices.iter().map(|inv| inv.client_email.as_str()).collect();
    DashboardSummary {
        total_revenue: invoices.iter().map(|inv| invoice_totals(inv).total).sum(),
        pending_invoices: invoices
            .iter()
            .filter(|inv| inv.status == InvoiceStatus::Pending)
            .count(),
        active_clients: clients.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;

    fn invoice(id: &str, status: InvoiceStatus, email: &str, total: f64) -> Invoice {
        Invoice {
            id: id.to_string(),
            client_name: "Client".to_string(),
            client_email: email.to_string(),
            client_address: None,
            date: "2025-01-01".to_string(),
            due_date: "2025-02-01".to_string(),
            items: vec![LineItem {
                id: format!("{}-line", id),
                description: String::new(),
                quantity: 1.0,
                price: total,
            }],
            tax_rate: 0.0,
            discount: 0.0,
            status,
            currency: "SAR".to_string(),
            notes: None,
            payment_terms: None,
        }
    }

    fn product(name: &str, stock: i64) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            description: String::new(),
            sku: format!("SKU-{}", name),
            price: 1.0,
            stock,
            images: Vec::new(),
        }
    }

    #[test]
    fn aggregates_revenue_and_pending_figures() {
        let invoices = vec![
            invoice("a", InvoiceStatus::Pending, "a@x.test", 100.0),
            invoice("b", InvoiceStatus::Paid, "b@x.test", 50.0),
        ];
        let context = build_financial_context(&invoices, &[]);
        assert_eq!(context.total_revenue, 150.0);
        assert_eq!(context.pending_invoices, 1);
        assert_eq!(context.pending_amount, 100.0);
        assert_eq!(context.total_invoices, 2);
        assert_eq!(context.product_count, 0);
    }

    #[test]
    fn low_stock_boundary_is_exclusive_at_ten() {
        let products = vec![product("almost-out", 9), product("fine", 10)];
        let context = build_financial_context(&[], &products);
        assert_eq!(context.low_stock_products, vec!["almost-out".to_string()]);
        assert_eq!(context.product_count, 2);
    }

    #[test]
    fn context_serializes_to_compact_json() {
        let context = build_financial_context(&[], &[]);
        let json = context.to_json();
        assert!(json.contains("\"total_revenue\":0.0"));
        assert!(json.contains("\"low_stock_products\":[]"));
    }

    #[test]
    fn dashboard_counts_distinct_clients() {
        let invoices = vec![
            invoice("a", InvoiceStatus::Pending, "same@x.test", 10.0),
            invoice("b", InvoiceStatus::Paid, "same@x.test", 20.0),
            invoice("c", InvoiceStatus::Paid, "other@x.test", 30.0),
        ];
        let summary = build_dashboard_summary(&invoices);
        assert_eq!(summary.total_revenue, 60.0);
        assert_eq!(summary.pending_invoices, 1);
        assert_eq!(summary.active_clients, 2);
    }
}
