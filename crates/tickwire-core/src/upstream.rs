//! Decoder for the upstream tickers document.

use serde::Deserialize;

use crate::domain::{TickerRecord, UtcDateTime};
use crate::error::ResolveError;

/// Cap on the offending-body copy embedded in decode errors.
const BODY_EXCERPT_LIMIT: usize = 256;

#[derive(Debug, Deserialize)]
struct TickersDocument {
    tickers: Vec<TickerEntry>,
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    base: String,
    market: MarketEntry,
    converted_last: ConvertedLast,
    timestamp: UtcDateTime,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ConvertedLast {
    usd: f64,
}

/// Decodes a raw upstream body into ordered ticker records.
///
/// Source order is preserved, duplicate market names included; which
/// duplicate wins is the resolver's decision, not the parser's.
pub fn parse_tickers(body: &str) -> Result<Vec<TickerRecord>, ResolveError> {
    let document: TickersDocument =
        serde_json::from_str(body).map_err(|error| ResolveError::Decode {
            source_msg: error.to_string(),
            body_excerpt: body_excerpt(body),
        })?;

    Ok(document
        .tickers
        .into_iter()
        .map(|entry| TickerRecord {
            market_name: entry.market.name,
            base_asset: entry.base,
            converted_usd: entry.converted_last.usd,
            timestamp: entry.timestamp,
        })
        .collect())
}

fn body_excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LIMIT {
        return body.to_owned();
    }
    let mut cut = BODY_EXCERPT_LIMIT;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{} [truncated]", &body[..cut])
}
