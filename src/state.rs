// src/state.rs
use std::sync::Arc;

use crate::services::concierge::CompletionClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }
}
