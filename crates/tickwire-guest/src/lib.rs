//! Host/guest boundary for one price resolution call.
//!
//! The host delivers two JSON byte buffers (request args and secret args)
//! and receives exactly one serialized envelope buffer back. Every path
//! through `handle`, including malformed inputs and internal defects,
//! converges on a well-formed envelope; nothing crosses the boundary as a
//! fault.

use std::sync::Arc;

use tickwire_core::domain::{PriceResult, RequestArgs, SecretArgs};
use tickwire_core::envelope::{encode_failure, encode_success};
use tickwire_core::error::ResolveError;
use tickwire_core::http_client::HttpClient;
use tickwire_core::resolver;
use tickwire_core::source::{CoinGeckoSource, SourceConfig};

/// Boundary entry point. Holds the transport and endpoint configuration;
/// all per-call state is created fresh inside `handle` and discarded with
/// the envelope.
pub struct PriceGuest {
    source: CoinGeckoSource,
}

impl PriceGuest {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            source: CoinGeckoSource::new(client),
        }
    }

    pub fn with_config(client: Arc<dyn HttpClient>, config: SourceConfig) -> Self {
        Self {
            source: CoinGeckoSource::with_config(client, config),
        }
    }

    /// Runs one resolution call start to finish and returns the envelope
    /// buffer.
    pub fn handle(&self, input: &[u8], secret: &[u8]) -> Vec<u8> {
        let args: RequestArgs = match serde_json::from_slice(input) {
            Ok(args) => args,
            Err(error) => {
                return encode_failure(&format!("could not decode input args: {error}"));
            }
        };

        let secret: SecretArgs = match serde_json::from_slice(secret) {
            Ok(secret) => secret,
            Err(error) => {
                // serde errors carry positions, not input bytes, so no key
                // material can leak through this message.
                return encode_failure(&format!("could not decode secret args: {error}"));
            }
        };

        match self.resolve_price(&args, &secret) {
            Ok(price) => encode_success(&price),
            Err(error) => {
                tracing::debug!(market = %args.market, %error, "resolution failed");
                encode_failure(&format!("getting price: {error}"))
            }
        }
    }

    fn resolve_price(
        &self,
        args: &RequestArgs,
        secret: &SecretArgs,
    ) -> Result<PriceResult, ResolveError> {
        let tickers = self.source.fetch_tickers(&args.coin_id, &secret.api_key)?;
        resolver::resolve(&tickers, &args.market)
    }
}
