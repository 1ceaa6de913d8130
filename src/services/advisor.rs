use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, ChatRole, Invoice, Language, Product};
use crate::services::context::build_financial_context;
use crate::store::{Ledger, StoreError};

pub const NOT_CONFIGURED_MESSAGE: &str =
    "The advisory API key is missing. Set OPENAI_API_KEY to enable the advisor.";
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I'm having trouble connecting to the advisory service right now.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "I couldn't generate a response.";

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f32 = 0.4;

/// Only this many trailing chat turns are forwarded as context; the retained
/// history the user sees is never truncated.
const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Seam for the single outbound call, so tests can count and inspect requests
/// without a network.
pub trait ChatTransport {
    fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct HttpChatTransport {
    client: reqwest::Client,
}

impl HttpChatTransport {
    pub fn new() -> Self {
        HttpChatTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpChatTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTransport for HttpChatTransport {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("advisory API error {}: {}", status, body));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .first()
            .ok_or_else(|| anyhow!("empty response"))?
            .message
            .content
            .trim()
            .to_string();
        Ok(content)
    }
}

/// Stateless per-request advisory service: every call rebuilds the context
/// summary and instruction payload from scratch.
pub struct AdvisorService<T> {
    api_key: Option<String>,
    transport: T,
}

impl AdvisorService<HttpChatTransport> {
    /// Reads the single advisory credential from the environment; a missing or
    /// blank value leaves the service in the not-configured state.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        AdvisorService {
            api_key,
            transport: HttpChatTransport::new(),
        }
    }
}

impl<T: ChatTransport> AdvisorService<T> {
    pub fn with_transport(api_key: Option<String>, transport: T) -> Self {
        AdvisorService { api_key, transport }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Produces the model reply for one user message. Never fails: a missing
    /// credential short-circuits before any transport call and every transport
    /// problem degrades to a fixed fallback string.
    pub async fn generate_advice(
        &self,
        message: &str,
        history: &[ChatMessage],
        invoices: &[Invoice],
        products: &[Product],
        language: Language,
    ) -> String {
        let Some(api_key) = &self.api_key else {
            return NOT_CONFIGURED_MESSAGE.to_string();
        };

        let request = build_request(message, history, invoices, products, language);
        match self.transport.complete(api_key, &request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(err) => {
                tracing::error!(error = %err, "advisory call failed");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}

fn build_request(
    message: &str,
    history: &[ChatMessage],
    invoices: &[Invoice],
    products: &[Product],
    language: Language,
) -> ChatRequest {
    let context = build_financial_context(invoices, products);

    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
    messages.push(WireMessage {
        role: "system".to_string(),
        content: system_instruction(&context.to_json(), language),
    });

    let skip = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[skip..] {
        messages.push(WireMessage {
            role: match turn.role {
                ChatRole::User => "user".to_string(),
                ChatRole::Model => "assistant".to_string(),
            },
            content: turn.text.clone(),
        });
    }

    messages.push(WireMessage {
        role: "user".to_string(),
        content: message.to_string(),
    });

    ChatRequest {
        model: MODEL.to_string(),
        temperature: TEMPERATURE,
        messages,
    }
}

fn system_instruction(context_json: &str, language: Language) -> String {
    format!(
        "You are an expert CFO and Financial Advisor for a small-to-medium enterprise. \
Your tone is professional, encouraging, and insightful.\n\n\
Current Financial Context:\n{}\n\n\
Rules:\n\
1. Answer the user's questions based on the provided context.\n\
2. If they ask for an analysis, provide a structured summary using Markdown (bold key figures).\n\
3. Respond in the language code: \"{}\".\n\
4. Keep answers concise but valuable.\n\
5. If asked about products, mention low stock items if any.",
        context_json,
        language.code()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The exchange completed and exactly one model message was appended.
    Answered,
    /// A request is already in flight; the submission was ignored.
    Busy,
    /// Whitespace-only input; nothing was appended.
    EmptyInput,
}

/// One advisory conversation cycle: Idle -> Pending -> Idle, no retry state.
/// The user message is appended optimistically before the call resolves.
#[derive(Debug, Default)]
pub struct AdvisorChat {
    pending: bool,
}

impl AdvisorChat {
    pub fn new() -> Self {
        AdvisorChat::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub async fn submit<T: ChatTransport>(
        &mut self,
        ledger: &mut Ledger,
        advisor: &AdvisorService<T>,
        input: &str,
    ) -> Result<SubmitOutcome, StoreError> {
        let message = input.trim().to_string();
        if message.is_empty() {
            return Ok(SubmitOutcome::EmptyInput);
        }
        if self.pending {
            return Ok(SubmitOutcome::Busy);
        }
        self.pending = true;

        // Context history is the snapshot taken before the optimistic append;
        // the new message travels separately in the request.
        let history = ledger.chat_history().to_vec();
        if let Err(err) = ledger.add_chat_message(ChatMessage::user(&message)) {
            self.pending = false;
            return Err(err);
        }

        let reply = {
            let state = ledger.state();
            advisor
                .generate_advice(
                    &message,
                    &history,
                    &state.invoices,
                    &state.products,
                    state.language,
                )
                .await
        };

        let result = ledger.add_chat_message(ChatMessage::model(reply));
        self.pending = false;
        result.map(|()| SubmitOutcome::Answered)
    }
}
