//! External reasoning-service boundary.
//!
//! The reasoning collaborator converts statements into argument maps over
//! HTTP pipes. [`ReasoningService`] is the seam the engine depends on;
//! [`ReasonerClient`] is the HTTP implementation. Payloads returned by the
//! service are opaque until validated by the mutation applicator.

mod client;
mod types;

pub use client::ReasonerClient;
pub use types::{
    AnalyzePayload, AnalyzeRequest, BaselinePayload, ChatPayload, Message, MessageRole,
    ModerateRequest, PipeRequest, PipeResponse,
};

use async_trait::async_trait;

use crate::error::ReasonerResult;

/// The engine's view of the reasoning collaborator.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Fold a statement into the argument graph, returning a full
    /// replacement map and an optional baseline leaning payload.
    async fn analyze(&self, request: AnalyzeRequest) -> ReasonerResult<AnalyzePayload>;

    /// Handle a moderator instruction, returning a reply and an optional
    /// corrective replacement map.
    async fn moderate(&self, request: ModerateRequest) -> ReasonerResult<ChatPayload>;
}

/// Extract JSON from a completion string, handling markdown code blocks.
///
/// Attempts extraction in this order:
/// 1. Try parsing as raw JSON first (fast path)
/// 2. Extract from ```json ... ``` code blocks
/// 3. Extract from ``` ... ``` code blocks
/// 4. Return error if none work
pub(crate) fn extract_json_from_completion(completion: &str) -> Result<&str, String> {
    // Fast path: raw JSON
    let trimmed = completion.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed);
    }

    // Try ```json ... ``` blocks
    if completion.contains("```json") {
        return completion
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Found ```json block but content was empty or malformed".to_string());
    }

    // Try ``` ... ``` blocks
    if completion.contains("```") {
        return completion
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Found ``` block but content was empty or malformed".to_string());
    }

    Err(format!(
        "No JSON found in response. First 100 chars: '{}'",
        completion.chars().take(100).collect::<String>()
    ))
}
