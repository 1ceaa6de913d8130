use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_address: Option<String>,
    pub date: String,
    pub due_date: String,
    pub items: Vec<LineItem>,
    pub tax_rate: f64,
    pub discount: f64,
    pub status: InvoiceStatus,
    pub currency: String,
    pub notes: Option<String>,
    pub payment_terms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    /// Encoded image blobs, display order. The store caps this at
    /// [`MAX_PRODUCT_IMAGES`] entries.
    pub images: Vec<String>,
}

pub const MAX_PRODUCT_IMAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: crate::utils::now_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    pub name: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    pub logo_url: String,
    pub signature_url: String,
    pub currency: String,
}

impl Default for CompanySettings {
    fn default() -> Self {
        CompanySettings {
            name: "اسم شركتك هنا".to_string(),
            email: "info@company.com".to_string(),
            address: "الرياض، المملكة العربية السعودية".to_string(),
            tax_id: String::new(),
            logo_url: String::new(),
            signature_url: String::new(),
            currency: "SAR".to_string(),
        }
    }
}

/// Partial update for the settings singleton; only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySettingsPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub logo_url: Option<String>,
    pub signature_url: Option<String>,
    pub currency: Option<String>,
}

impl CompanySettings {
    pub fn apply(&mut self, patch: CompanySettingsPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(tax_id) = patch.tax_id {
            self.tax_id = tax_id;
        }
        if let Some(logo_url) = patch.logo_url {
            self.logo_url = logo_url;
        }
        if let Some(signature_url) = patch.signature_url {
            self.signature_url = signature_url;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
    Es,
    Nl,
    Th,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
            Language::Es => "es",
            Language::Nl => "nl",
            Language::Th => "th",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }
}

/// The entire process-wide state, persisted as one blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    pub theme: Theme,
    pub language: Language,
    pub invoices: Vec<Invoice>,
    pub products: Vec<Product>,
    pub chat_history: Vec<ChatMessage>,
    pub company_settings: CompanySettings,
}

impl Default for LedgerState {
    fn default() -> Self {
        LedgerState {
            theme: Theme::Light,
            language: Language::Ar,
            invoices: Vec::new(),
            products: Vec::new(),
            chat_history: Vec::new(),
            company_settings: CompanySettings::default(),
        }
    }
}
