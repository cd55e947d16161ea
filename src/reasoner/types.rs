use serde::{Deserialize, Serialize};

use crate::error::{ReasonerError, ReasonerResult};
use crate::graph::{DebateMap, Speaker};

use super::extract_json_from_completion;

/// Message in a pipe conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Message role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to run a reasoning pipe
#[derive(Debug, Clone, Serialize)]
pub struct PipeRequest {
    /// Pipe name (required by the service API)
    pub name: String,
    pub messages: Vec<Message>,
    /// Disable streaming (default: false for non-streaming response)
    #[serde(default)]
    pub stream: bool,
    #[serde(rename = "threadId", skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl PipeRequest {
    /// Create a new pipe request with name and messages
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            messages,
            stream: false, // synchronous responses only
            thread_id: None,
        }
    }

    /// Set the thread ID for conversation continuity
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

/// Response from a reasoning pipe
#[derive(Debug, Clone, Deserialize)]
pub struct PipeResponse {
    pub success: bool,
    pub completion: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
}

// ============================================================================
// Analyze operation
// ============================================================================

/// Request to fold one statement into the argument graph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    /// The current map the reasoner amends.
    pub current_map: DebateMap,
    /// Which side made the statement.
    pub speaker: Speaker,
    /// The raw statement text.
    pub statement: String,
}

/// Baseline read of the debate accompanying an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselinePayload {
    /// Which side is winning, -1..+1, negative favoring SideA.
    pub leaning: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaning_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_b: Option<String>,
}

/// Parsed analyze completion: a full replacement map plus an optional
/// baseline. Opaque until validated by the mutation applicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePayload {
    #[serde(flatten)]
    pub map: DebateMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselinePayload>,
}

impl AnalyzePayload {
    /// Parse an analyze completion. Unlike a conversational pipe, a map
    /// replacement has no usable plain-text fallback: an unparseable
    /// completion is an invalid response and the caller retries.
    pub fn from_completion(completion: &str) -> ReasonerResult<Self> {
        let json = extract_json_from_completion(completion)
            .map_err(|message| ReasonerError::InvalidResponse { message })?;
        serde_json::from_str(json).map_err(|e| ReasonerError::InvalidResponse {
            message: format!("Failed to parse analyze payload: {}", e),
        })
    }
}

// ============================================================================
// Moderator instruction operation
// ============================================================================

/// Request on the chat/instruction channel.
#[derive(Debug, Clone, Serialize)]
pub struct ModerateRequest {
    /// The instruction text.
    pub instruction: String,
    /// Running conversation history, oldest first.
    pub transcript: Vec<Message>,
    /// The current map, for corrective instructions.
    pub current_map: DebateMap,
}

/// Parsed moderator completion: a reply and, for corrective instructions,
/// a full replacement map applied atomically after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPayload {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<DebateMap>,
}

impl ChatPayload {
    /// Parse a moderator completion. A plain-text completion is treated as
    /// a reply with no map patch; a completion that carries JSON must parse,
    /// so a malformed map patch is rejected rather than echoed back as text.
    pub fn from_completion(completion: &str) -> ReasonerResult<Self> {
        match extract_json_from_completion(completion) {
            Ok(json) => serde_json::from_str(json).map_err(|e| ReasonerError::InvalidResponse {
                message: format!("Failed to parse moderator payload: {}", e),
            }),
            Err(_) => Ok(Self {
                reply: completion.to_string(),
                map: None,
            }),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
