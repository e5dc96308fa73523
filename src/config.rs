use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Classification and similarity configuration
    pub classification: ClassificationConfig,

    /// Startup seeding configuration
    pub seed: SeedConfig,

    /// Background case generation configuration
    pub scheduler: SchedulerConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: SCM_)
            .add_source(
                config::Environment::with_prefix("SCM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            classification: ClassificationConfig::default(),
            seed: SeedConfig::default(),
            scheduler: SchedulerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Number of similar cases to keep per case
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Similarity scores at or below this value are discarded
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Maximum vocabulary size for the similarity index
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_similarity: default_min_similarity(),
            max_features: default_max_features(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed the store with synthetic cases when it is empty
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of cases to seed
    #[serde(default = "default_seed_count")]
    pub count: usize,

    /// Compute similarity edges for at most this many seeded cases
    #[serde(default = "default_seed_similarity_limit")]
    pub similarity_limit: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: default_seed_count(),
            similarity_limit: default_seed_similarity_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Enable the recurring case generation job
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cron schedule (seconds-resolution, 6 fields)
    #[serde(default = "default_generation_schedule")]
    pub generation_schedule: String,

    /// Cases generated per run
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            generation_schedule: default_generation_schedule(),
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_top_k() -> usize {
    3
}

fn default_min_similarity() -> f64 {
    0.1
}

fn default_max_features() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_seed_count() -> usize {
    500
}

fn default_seed_similarity_limit() -> usize {
    100
}

fn default_generation_schedule() -> String {
    // Every 10 minutes
    "0 */10 * * * *".to_string()
}

fn default_batch_size() -> usize {
    5
}

fn default_log_level() -> String {
    "support_case_manager=info,tower_http=info".to_string()
}
