//! Core contracts for tickwire.
//!
//! This crate contains:
//! - Canonical domain models for one ticker resolution call
//! - Upstream response parsing and first-match price resolution
//! - The two-shape boundary envelope and its frozen wire rules
//! - The HTTP transport seam and the CoinGecko ticker source

pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod resolver;
pub mod source;
pub mod upstream;

pub use domain::{PriceResult, RequestArgs, SecretArgs, TickerRecord, UtcDateTime};
pub use envelope::{encode_failure, encode_success, Outcome};
pub use error::ResolveError;
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use resolver::resolve;
pub use source::{CoinGeckoSource, SourceConfig};
pub use upstream::parse_tickers;
