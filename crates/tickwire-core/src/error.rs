use thiserror::Error;

/// Terminal failure modes for a single resolution call.
///
/// Every variant's display string is the exact message the failure envelope
/// carries across the boundary; nothing here is retried or recovered
/// locally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// Upstream body was not valid JSON or did not match the expected
    /// document shape. Carries a truncated copy of the offending body for
    /// diagnosis.
    #[error("decoding upstream tickers: {source_msg}...{body_excerpt}")]
    Decode {
        source_msg: String,
        body_excerpt: String,
    },

    #[error("http request failed with status code {status}")]
    UpstreamStatus { status: u16 },

    #[error("market {market} not found")]
    MarketNotFound { market: String },

    #[error("making http request: {message}")]
    Transport { message: String },

    /// Upstream reported a negative or non-finite USD price. Converting one
    /// would be undefined; fail deterministically instead.
    #[error("market {market} reported unusable usd price {value}")]
    PriceOutOfRange { market: String, value: f64 },

    #[error("timestamp is not a valid RFC3339 instant: '{value}'")]
    BadTimestamp { value: String },
}
