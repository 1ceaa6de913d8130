//! Printable invoice projection: a pure, deterministic mapping from an
//! invoice, the company settings and the selected language to a paginated
//! document model. Rendering backends consume this structure as-is; totals
//! come straight from the calculator and are never recomputed here.

use crate::models::{CompanySettings, Invoice, Language, TextDirection};
use crate::totals::invoice_totals;
use crate::utils::{format_amount, normalize_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLabels {
    pub invoice_title: String,
    pub description: String,
    pub qty: String,
    pub price: String,
    pub total: String,
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub grand_total: String,
    pub tax_id: String,
    pub notes: String,
    pub payment_terms: String,
}

impl DocumentLabels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => DocumentLabels {
                invoice_title: "Invoices".into(),
                description: "Description".into(),
                qty: "Qty".into(),
                price: "Price".into(),
                total: "Total".into(),
                subtotal: "Subtotal".into(),
                tax: "Tax (VAT)".into(),
                discount: "Discount".into(),
                grand_total: "Grand Total".into(),
                tax_id: "Tax ID / VAT Number".into(),
                notes: "Notes & Terms".into(),
                payment_terms: "Payment Terms".into(),
            },
            Language::Ar => DocumentLabels {
                invoice_title: "الفواتير".into(),
                description: "الوصف".into(),
                qty: "الكمية".into(),
                price: "السعر".into(),
                total: "الإجمالي".into(),
                subtotal: "المجموع الفرعي".into(),
                tax: "الضريبة (VAT)".into(),
                discount: "الخصم".into(),
                grand_total: "المبلغ النهائي".into(),
                tax_id: "الرقم الضريبي".into(),
                notes: "الملاحظات والشروط".into(),
                payment_terms: "شروط الدفع".into(),
            },
            Language::Es => DocumentLabels {
                invoice_title: "Facturas".into(),
                description: "Descripción".into(),
                qty: "Cant".into(),
                price: "Precio".into(),
                total: "Total".into(),
                subtotal: "Subtotal".into(),
                tax: "Impuesto (IVA)".into(),
                discount: "Descuento".into(),
                grand_total: "Gran Total".into(),
                tax_id: "ID Tributario".into(),
                notes: "Notas y Términos".into(),
                payment_terms: "Términos de Pago".into(),
            },
            Language::Nl => DocumentLabels {
                invoice_title: "Facturen".into(),
                description: "Omschrijving".into(),
                qty: "Aantal".into(),
                price: "Prijs".into(),
                total: "Totaal".into(),
                subtotal: "Subtotaal".into(),
                tax: "BTW".into(),
                discount: "Korting".into(),
                grand_total: "Totaalbedrag".into(),
                tax_id: "BTW Nummer".into(),
                notes: "Notities & Voorwaarden".into(),
                payment_terms: "Betalingsvoorwaarden".into(),
            },
            Language::Th => DocumentLabels {
                invoice_title: "ใบแจ้งหนี้".into(),
                description: "รายละเอียด".into(),
                qty: "จำนวน".into(),
                price: "ราคา".into(),
                total: "รวม".into(),
                subtotal: "ยอดรวมย่อย".into(),
                tax: "ภาษีมูลค่าเพิ่ม".into(),
                discount: "ส่วนลด".into(),
                grand_total: "ยอดรวมทั้งสิ้น".into(),
                tax_id: "เลขประจำตัวผู้เสียภาษี".into(),
                notes: "หมายเหตุ".into(),
                payment_terms: "เงื่อนไขการชำระเงิน".into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub company_name: String,
    pub company_address: String,
    pub company_email: String,
    pub tax_id: Option<String>,
    pub logo_url: Option<String>,
    pub invoice_id: String,
    pub issue_date: String,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillTo {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLine {
    pub description: String,
    pub quantity: f64,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsBlock {
    pub subtotal: String,
    pub tax_rate: f64,
    pub tax_amount: String,
    /// Present only when a discount was applied.
    pub discount: Option<String>,
    pub grand_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFooter {
    pub notes: Option<String>,
    pub payment_terms: Option<String>,
    pub signature_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub page_size: PageSize,
    pub direction: TextDirection,
    pub labels: DocumentLabels,
    pub header: DocumentHeader,
    pub bill_to: BillTo,
    pub lines: Vec<DocumentLine>,
    pub totals: TotalsBlock,
    pub footer: DocumentFooter,
}

pub fn render_invoice_document(
    invoice: &Invoice,
    settings: &CompanySettings,
    language: Language,
) -> InvoiceDocument {
    let totals = invoice_totals(invoice);
    let currency = invoice.currency.as_str();

    let lines = invoice
        .items
        .iter()
        .map(|item| DocumentLine {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: money(currency, item.price),
            line_total: money(currency, item.quantity * item.price),
        })
        .collect();

    InvoiceDocument {
        page_size: PageSize::A4,
        direction: language.direction(),
        labels: DocumentLabels::for_language(language),
        header: DocumentHeader {
            company_name: settings.name.clone(),
            company_address: settings.address.clone(),
            company_email: settings.email.clone(),
            tax_id: non_empty(&settings.tax_id),
            logo_url: non_empty(&settings.logo_url),
            invoice_id: invoice.id.clone(),
            issue_date: normalize_date(&invoice.date),
            due_date: normalize_date(&invoice.due_date),
        },
        bill_to: BillTo {
            name: invoice.client_name.clone(),
            email: invoice.client_email.clone(),
            address: invoice.client_address.clone(),
        },
        lines,
        totals: TotalsBlock {
            subtotal: money(currency, totals.subtotal),
            tax_rate: invoice.tax_rate,
            tax_amount: money(currency, totals.tax_amount),
            discount: (invoice.discount > 0.0).then(|| money(currency, invoice.discount)),
            grand_total: money(currency, totals.total),
        },
        footer: DocumentFooter {
            notes: invoice.notes.clone(),
            payment_terms: invoice.payment_terms.clone(),
            signature_url: non_empty(&settings.signature_url),
        },
    }
}

fn money(currency: &str, amount: f64) -> String {
    format!("{} {}", currency, format_amount(amount))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, LineItem};
    use crate::totals::compute_totals;

    fn sample_invoice() -> Invoice {
        Invoice {
            id: "INV-2025-0042".to_string(),
            client_name: "Acme".to_string(),
            client_email: "billing@acme.test".to_string(),
            client_address: Some("42 Main St".to_string()),
            date: "15.01.2025".to_string(),
            due_date: "2025-02-15".to_string(),
            items: vec![
                LineItem {
                    id: "l1".to_string(),
                    description: "Consulting".to_string(),
                    quantity: 2.0,
                    price: 25.0,
                },
                LineItem {
                    id: "l2".to_string(),
                    description: "Hosting".to_string(),
                    quantity: 1.0,
                    price: 10.0,
                },
            ],
            tax_rate: 15.0,
            discount: 5.0,
            status: InvoiceStatus::Pending,
            currency: "SAR".to_string(),
            notes: Some("Thanks!".to_string()),
            payment_terms: None,
        }
    }

    #[test]
    fn totals_block_matches_the_calculator() {
        let invoice = sample_invoice();
        let document = render_invoice_document(&invoice, &CompanySettings::default(), Language::En);
        let totals = compute_totals(&invoice.items, invoice.tax_rate, invoice.discount);

        assert_eq!(document.totals.subtotal, "SAR 60.00");
        assert_eq!(document.totals.tax_amount, "SAR 9.00");
        assert_eq!(document.totals.grand_total, format!("SAR {:.2}", totals.total));
        assert_eq!(document.totals.discount.as_deref(), Some("SAR 5.00"));
    }

    #[test]
    fn discount_row_is_omitted_when_zero() {
        let mut invoice = sample_invoice();
        invoice.discount = 0.0;
        let document = render_invoice_document(&invoice, &CompanySettings::default(), Language::En);
        assert_eq!(document.totals.discount, None);
    }

    #[test]
    fn arabic_renders_right_to_left() {
        let invoice = sample_invoice();
        let document = render_invoice_document(&invoice, &CompanySettings::default(), Language::Ar);
        assert_eq!(document.direction, TextDirection::Rtl);
        assert_eq!(document.labels.grand_total, "المبلغ النهائي");

        let english = render_invoice_document(&invoice, &CompanySettings::default(), Language::En);
        assert_eq!(english.direction, TextDirection::Ltr);
    }

    #[test]
    fn dates_are_normalized_and_lines_extended() {
        let invoice = sample_invoice();
        let document = render_invoice_document(&invoice, &CompanySettings::default(), Language::En);
        assert_eq!(document.header.issue_date, "2025-01-15");
        assert_eq!(document.header.due_date, "2025-02-15");
        assert_eq!(document.lines.len(), 2);
        assert_eq!(document.lines[0].line_total, "SAR 50.00");
        assert_eq!(document.lines[1].unit_price, "SAR 10.00");
    }

    #[test]
    fn blank_settings_fields_collapse_to_none() {
        let invoice = sample_invoice();
        let settings = CompanySettings::default();
        let document = render_invoice_document(&invoice, &settings, Language::En);
        assert_eq!(document.header.tax_id, None);
        assert_eq!(document.header.logo_url, None);
        assert_eq!(document.footer.signature_url, None);
        assert_eq!(document.footer.notes.as_deref(), Some("Thanks!"));
    }
}
