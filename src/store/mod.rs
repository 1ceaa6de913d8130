use thiserror::Error;

use crate::models::{
    ChatMessage, CompanySettingsPatch, Invoice, Language, LedgerState, Product, Theme,
    MAX_PRODUCT_IMAGES,
};
use crate::storage::JsonStateStorage;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("record id already exists: {0}")]
    DuplicateId(String),
}

/// The record store: owns the five state slices and a storage handle, and
/// persists the whole blob before any mutation returns. Built by the
/// composition root and handed to consumers explicitly; there is no global.
pub struct Ledger {
    state: LedgerState,
    storage: JsonStateStorage,
}

impl Ledger {
    pub fn open(storage: JsonStateStorage) -> Self {
        let state = storage.load();
        Ledger { state, storage }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.state.invoices
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.state.chat_history
    }

    /// Prepends, so the invoice list stays newest-first. A colliding id is
    /// rejected instead of silently creating an ambiguous record.
    pub fn add_invoice(&mut self, invoice: Invoice) -> Result<(), StoreError> {
        if self.state.invoices.iter().any(|i| i.id == invoice.id) {
            return Err(StoreError::DuplicateId(invoice.id));
        }
        self.state.invoices.insert(0, invoice);
        self.persist()
    }

    /// Replaces the record whose id matches; unknown ids are a silent no-op.
    pub fn update_invoice(&mut self, id: &str, invoice: Invoice) -> Result<(), StoreError> {
        if let Some(slot) = self.state.invoices.iter_mut().find(|i| i.id == id) {
            *slot = invoice;
        }
        self.persist()
    }

    pub fn delete_invoice(&mut self, id: &str) -> Result<(), StoreError> {
        self.state.invoices.retain(|i| i.id != id);
        self.persist()
    }

    pub fn add_product(&mut self, mut product: Product) -> Result<(), StoreError> {
        if self.state.products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::DuplicateId(product.id));
        }
        product.images.truncate(MAX_PRODUCT_IMAGES);
        self.state.products.insert(0, product);
        self.persist()
    }

    pub fn update_product(&mut self, id: &str, mut product: Product) -> Result<(), StoreError> {
        product.images.truncate(MAX_PRODUCT_IMAGES);
        if let Some(slot) = self.state.products.iter_mut().find(|p| p.id == id) {
            *slot = product;
        }
        self.persist()
    }

    pub fn delete_product(&mut self, id: &str) -> Result<(), StoreError> {
        self.state.products.retain(|p| p.id != id);
        self.persist()
    }

    /// Case-insensitive substring match on name or sku, in stored order.
    pub fn search_products(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.state
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.sku.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Appends; chat history is oldest-first, unlike the record lists.
    pub fn add_chat_message(&mut self, message: ChatMessage) -> Result<(), StoreError> {
        self.state.chat_history.push(message);
        self.persist()
    }

    pub fn clear_chat(&mut self) -> Result<(), StoreError> {
        self.state.chat_history.clear();
        self.persist()
    }

    pub fn update_company_settings(
        &mut self,
        patch: CompanySettingsPatch,
    ) -> Result<(), StoreError> {
        self.state.company_settings.apply(patch);
        self.persist()
    }

    pub fn toggle_theme(&mut self) -> Result<(), StoreError> {
        self.state.theme = self.state.theme.toggled();
        self.persist()
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), StoreError> {
        self.state.language = language;
        self.persist()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.storage.save(&self.state)
    }
}
