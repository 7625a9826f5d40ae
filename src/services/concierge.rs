// src/services/concierge.rs
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// MC's persona and product knowledge base, sent as the system turn of every
/// request.
pub const SYSTEM_PROMPT: &str = "\
You are Loop's MC assistant. You know that Loop is the world's first digital music manager platform.
Answer FAQs about Loop's features, pricing, integrations, and sign-up process.
Be concise, friendly, and helpful. Keep responses under 150 words.

Key information about Loop:
- Loop is the world's first digital music manager platform
- Helps artists organize, distribute, and monetize their music across all platforms
- Offers music distribution, rights management, analytics, revenue tracking, playlist pitching, and collaboration tools
- Integrates with Spotify, Apple Music, YouTube Music, Amazon Music, Bandcamp, and 150+ other platforms
- Flexible pricing plans starting from $9.99/month for indie artists
- Contact: nick@loopdsp.com
- Instagram: @loop_mp3
- Music goes live on streaming platforms within 24-48 hours after upload";

/// Substituted when the provider answers with no content at all; the endpoint
/// never returns an empty reply.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that request. Please try again.";

pub const UPSTREAM_ERROR_MESSAGE: &str =
    "I'm experiencing technical difficulties. Please try again later.";

/// Failure-branch reply pointing the user at a direct contact channel.
pub const UPSTREAM_FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting right now. \
     Please reach out directly at nick@loopdsp.com for assistance!";

/// Seam between the relay and the completion provider. Handlers and tests see
/// only this trait; transport and payload details stay in the implementations.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a `system` context message followed by a `user` prompt and return
    /// the assistant's response text.
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String>;
}

/// Forward one user message to the provider under MC's persona.
///
/// Exactly one attempt, no retry. A blank provider answer is replaced with
/// [`EMPTY_REPLY`]; errors propagate to the caller for the fallback branch.
pub async fn ask(llm: &dyn CompletionClient, message: &str) -> anyhow::Result<String> {
    let reply = llm.complete(SYSTEM_PROMPT, message).await?;
    if reply.trim().is_empty() {
        Ok(EMPTY_REPLY.to_string())
    } else {
        Ok(reply)
    }
}

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI chat-completions API.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, COMPLETIONS_URL)
    }

    /// Point the client at a non-default endpoint (tests, compatible servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage { role: "system", content: system },
                ApiMessage { role: "user", content: user },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("provider returned {status}: {body}");
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .context("failed to parse provider response")?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}
