// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaitlistRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaitlistAck {
    pub ok: bool,
}
