// src/client/transcript.rs
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::message::{ChatRequest, ChatResponse};

/// Seeded as the first assistant turn of every fresh session.
pub const GREETING: &str = "👋 Hey, I'm MC, your personal Music Concierge. \
     Ask me anything you need to know about Loop.";

/// Shown in place of a reply when the relay cannot be reached.
pub const CONNECTION_FALLBACK: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Clone, Debug)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: Instant,
}

impl Message {
    fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_user,
            timestamp: Instant::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("relay returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// The session's view of the relay. The production implementation is
/// [`RelayTransport`]; tests inject their own.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The relay answered and its reply is on the transcript.
    Replied,
    /// The relay failed; the canned fallback is on the transcript.
    FellBack,
    /// Whitespace-only input; the transcript is untouched.
    EmptyInput,
    /// An earlier send has not settled yet; the transcript is untouched.
    InFlight,
}

struct TranscriptInner {
    messages: Vec<Message>,
    loading: bool,
    scroll_anchor: Option<usize>,
}

impl TranscriptInner {
    fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_anchor = Some(self.messages.len() - 1);
    }
}

/// Conversation state for one page visit: the ordered transcript, the loading
/// flag, and the view's autoscroll anchor. Append-only, reset on reload (a new
/// session), never persisted.
///
/// At most one send is outstanding at a time: the loading flag doubles as a
/// single-flight token, checked and raised in the same critical section that
/// appends the user turn, so a double-submit cannot issue a second request.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<RwLock<TranscriptInner>>,
    transport: Arc<dyn ChatTransport>,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let mut inner = TranscriptInner {
            messages: Vec::new(),
            loading: false,
            scroll_anchor: None,
        };
        inner.append(Message::new(GREETING, false));
        Self {
            inner: Arc::new(RwLock::new(inner)),
            transport,
        }
    }

    /// Submit one user turn and await its reply.
    ///
    /// Appends exactly one user message and, unless the input was rejected,
    /// exactly one assistant message (reply or fallback). The loading flag is
    /// lowered on every settlement path.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::EmptyInput;
        }

        {
            let mut guard = self.inner.write().await;
            if guard.loading {
                return SendOutcome::InFlight;
            }
            guard.loading = true;
            guard.append(Message::new(trimmed, true));
        }

        let result = self.transport.send(trimmed).await;

        let mut guard = self.inner.write().await;
        guard.loading = false;
        match result {
            Ok(reply) => {
                guard.append(Message::new(reply, false));
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::warn!("relay call failed: {err}");
                guard.append(Message::new(CONNECTION_FALLBACK, false));
                SendOutcome::FellBack
            }
        }
    }

    /// Copy of the transcript, in append order.
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    /// Index the view should scroll to, recorded on every append. Draining it
    /// clears the pending autoscroll.
    pub async fn take_scroll_anchor(&self) -> Option<usize> {
        self.inner.write().await.scroll_anchor.take()
    }
}

/// Production transport: posts the message to the relay and reads the reply.
/// Any non-2xx status is an error; the session turns it into the fallback.
pub struct RelayTransport {
    client: reqwest::Client,
    url: String,
}

impl RelayTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ChatTransport for RelayTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.reply)
    }
}
