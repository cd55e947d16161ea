use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub reasoner: ReasonerConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
    pub pipes: PipeConfig,
    pub engine: EngineConfig,
}

/// Reasoning-service API configuration
#[derive(Debug, Clone)]
pub struct ReasonerConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

/// Pipe name configuration for the two reasoning-service endpoints
#[derive(Debug, Clone)]
pub struct PipeConfig {
    pub analyze: String,
    pub moderator: String,
}

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Weight applied to the locally observed invalidation delta when
    /// blending it with the baseline leaning score.
    pub leaning_weight: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let reasoner = ReasonerConfig {
            api_key: env::var("REASONER_API_KEY").map_err(|_| AppError::Config {
                message: "REASONER_API_KEY is required".to_string(),
            })?,
            base_url: env::var("REASONER_BASE_URL")
                .unwrap_or_else(|_| "https://api.langbase.com".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: env::var("RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
        };

        let pipes = PipeConfig {
            analyze: env::var("PIPE_ANALYZE").unwrap_or_else(|_| "debate-analyze-v1".to_string()),
            moderator: env::var("PIPE_MODERATOR")
                .unwrap_or_else(|_| "debate-moderator-v1".to_string()),
        };

        let engine = EngineConfig {
            leaning_weight: env::var("LEANING_WEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.7),
        };

        Ok(Config {
            reasoner,
            logging,
            request,
            pipes,
            engine,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            analyze: "debate-analyze-v1".to_string(),
            moderator: "debate-moderator-v1".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leaning_weight: 0.7,
        }
    }
}
