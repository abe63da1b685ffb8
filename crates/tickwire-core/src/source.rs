//! CoinGecko ticker source: one GET per resolution call.

use std::sync::Arc;

use crate::domain::TickerRecord;
use crate::error::ResolveError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::upstream;

/// Upstream endpoint configuration. Defaults target the public demo API;
/// tests point `base_url` at a canned transport instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.coingecko.com"),
            timeout_ms: 10_000,
        }
    }
}

/// Fetches the raw ticker list for a coin. No retry, no cache: any failure
/// is terminal for the call and classified by `ResolveError`.
#[derive(Clone)]
pub struct CoinGeckoSource {
    client: Arc<dyn HttpClient>,
    config: SourceConfig,
}

impl CoinGeckoSource {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            config: SourceConfig::default(),
        }
    }

    pub fn with_config(client: Arc<dyn HttpClient>, config: SourceConfig) -> Self {
        Self { client, config }
    }

    pub fn fetch_tickers(
        &self,
        coin_id: &str,
        api_key: &str,
    ) -> Result<Vec<TickerRecord>, ResolveError> {
        let endpoint = format!(
            "{}/api/v3/coins/{}/tickers",
            self.config.base_url,
            urlencoding::encode(coin_id),
        );

        let request = HttpRequest::get(&endpoint)
            .with_header("x-cg-demo-api-key", api_key)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self
            .client
            .execute(request)
            .map_err(|error| ResolveError::Transport {
                message: error.message().to_owned(),
            })?;

        if response.status != 200 {
            return Err(ResolveError::UpstreamStatus {
                status: response.status,
            });
        }

        tracing::debug!(coin_id, bytes = response.body.len(), "fetched tickers");
        upstream::parse_tickers(&response.body)
    }
}
