use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::types::{
    AnalyzePayload, AnalyzeRequest, ChatPayload, Message, ModerateRequest, PipeRequest,
    PipeResponse,
};
use super::ReasoningService;
use crate::config::{PipeConfig, ReasonerConfig, RequestConfig};
use crate::error::{ReasonerError, ReasonerResult};
use crate::prompts::{ANALYZE_PROMPT, MODERATOR_PROMPT};

/// HTTP client for the reasoning-service pipes API
#[derive(Clone)]
pub struct ReasonerClient {
    client: Client,
    base_url: String,
    api_key: String,
    request_config: RequestConfig,
    pipes: PipeConfig,
}

impl ReasonerClient {
    /// Create a new reasoner client
    pub fn new(
        config: &ReasonerConfig,
        request_config: RequestConfig,
        pipes: PipeConfig,
    ) -> ReasonerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(ReasonerError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            request_config,
            pipes,
        })
    }

    /// Call a reasoning pipe with bounded retries and exponential backoff
    pub async fn call_pipe(&self, request: PipeRequest) -> ReasonerResult<PipeResponse> {
        let url = format!("{}/v1/pipes/run", self.base_url);
        let pipe_name = request.name.clone();

        let mut last_error = None;
        let mut retries = 0;

        while retries <= self.request_config.max_retries {
            if retries > 0 {
                let delay = Duration::from_millis(
                    self.request_config.retry_delay_ms * (2_u64.pow(retries - 1)),
                );
                warn!(
                    pipe = %pipe_name,
                    retry = retries,
                    delay_ms = delay.as_millis(),
                    "Retrying reasoner request"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();

            match self.execute_request(&url, &request).await {
                Ok(response) => {
                    let latency = start.elapsed();
                    info!(
                        pipe = %pipe_name,
                        latency_ms = latency.as_millis(),
                        "Reasoner pipe call succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    let latency = start.elapsed();
                    error!(
                        pipe = %pipe_name,
                        error = %e,
                        latency_ms = latency.as_millis(),
                        retry = retries,
                        "Reasoner pipe call failed"
                    );
                    last_error = Some(e);
                    retries += 1;
                }
            }
        }

        Err(ReasonerError::Unavailable {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
            retries,
        })
    }

    /// Execute a single request (internal)
    async fn execute_request(
        &self,
        url: &str,
        request: &PipeRequest,
    ) -> ReasonerResult<PipeResponse> {
        debug!(
            pipe = %request.name,
            messages = request.messages.len(),
            "Calling reasoner pipe"
        );

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReasonerError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    ReasonerError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ReasonerError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let pipe_response: PipeResponse =
            response
                .json()
                .await
                .map_err(|e| ReasonerError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                })?;

        Ok(pipe_response)
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_analyze_messages(&self, request: &AnalyzeRequest) -> ReasonerResult<Vec<Message>> {
        let map_json =
            serde_json::to_string(&request.current_map).map_err(|e| {
                ReasonerError::InvalidResponse {
                    message: format!("Failed to serialize current map: {}", e),
                }
            })?;

        let user_msg = format!(
            "Current map:\n{}\n\nSpeaker: {}\nStatement:\n\"{}\"",
            map_json, request.speaker, request.statement
        );

        Ok(vec![Message::system(ANALYZE_PROMPT), Message::user(user_msg)])
    }

    fn build_moderate_messages(&self, request: &ModerateRequest) -> ReasonerResult<Vec<Message>> {
        let map_json =
            serde_json::to_string(&request.current_map).map_err(|e| {
                ReasonerError::InvalidResponse {
                    message: format!("Failed to serialize current map: {}", e),
                }
            })?;

        let mut messages = vec![Message::system(MODERATOR_PROMPT)];
        messages.extend(request.transcript.iter().cloned());
        messages.push(Message::user(format!(
            "Current map:\n{}\n\nInstruction:\n{}",
            map_json, request.instruction
        )));
        Ok(messages)
    }
}

#[async_trait]
impl ReasoningService for ReasonerClient {
    async fn analyze(&self, request: AnalyzeRequest) -> ReasonerResult<AnalyzePayload> {
        let messages = self.build_analyze_messages(&request)?;
        let pipe_request = PipeRequest::new(&self.pipes.analyze, messages);
        let response = self.call_pipe(pipe_request).await?;
        AnalyzePayload::from_completion(&response.completion)
    }

    async fn moderate(&self, request: ModerateRequest) -> ReasonerResult<ChatPayload> {
        let messages = self.build_moderate_messages(&request)?;
        let pipe_request = PipeRequest::new(&self.pipes.moderator, messages);
        let response = self.call_pipe(pipe_request).await?;
        ChatPayload::from_completion(&response.completion)
    }
}
