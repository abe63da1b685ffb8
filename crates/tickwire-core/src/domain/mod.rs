mod timestamp;

pub use timestamp::UtcDateTime;

use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

/// One upstream-reported trading-pair observation for a market venue.
///
/// Transient: exists only for the duration of one resolution call, handed
/// from the parser to the resolver and then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    pub market_name: String,
    pub base_asset: String,
    pub converted_usd: f64,
    pub timestamp: UtcDateTime,
}

/// Normalized resolution outcome carried by a success envelope.
///
/// `price` is the fixed-point USD price (scaled by 100000, truncated toward
/// zero); `timestamp` is Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    pub market: String,
    pub coin_id: String,
    pub currency: String,
    pub price: u64,
    pub timestamp: i64,
}

/// Per-call request input: the venue to match and the upstream coin key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestArgs {
    pub market: String,
    pub coin_id: String,
}

/// Per-call credential input.
#[derive(Clone, Deserialize)]
pub struct SecretArgs {
    pub api_key: String,
}

// The api key must never reach logs or envelopes, including through
// formatted error paths.
impl Debug for SecretArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretArgs")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
