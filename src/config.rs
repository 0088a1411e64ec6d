//! Storefront configuration

use clap::Parser;
use std::time::Duration;

const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Storefront client configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", about = "Storefront checkout client", long_about = None)]
pub struct StoreConfig {
    /// Base URL of the store service, e.g. `https://shop.example/api`
    #[arg(long, env = "STOREFRONT_API_URL")]
    pub api_url: String,

    /// How long to wait for the store to accept an order, in milliseconds
    #[arg(long, env = "STOREFRONT_SUBMIT_TIMEOUT_MS", default_value_t = DEFAULT_SUBMIT_TIMEOUT_MS)]
    pub submit_timeout_ms: u64,

    /// Capacity of the storefront actor's intent queue
    #[arg(long, env = "STOREFRONT_CHANNEL_BUFFER", default_value_t = DEFAULT_CHANNEL_BUFFER)]
    pub channel_buffer: usize,
}

impl StoreConfig {
    /// Configuration with defaults for everything but the service URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }

    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_channel_buffer(mut self, buffer: usize) -> Self {
        self.channel_buffer = buffer;
        self
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// Queue capacity; tokio rejects zero.
    pub fn channel_buffer(&self) -> usize {
        self.channel_buffer.max(1)
    }
}
