//! First-match price resolution and fixed-point conversion.

use crate::domain::{PriceResult, TickerRecord};
use crate::error::ResolveError;

/// Scale between a USD float price and its fixed-point wire form.
pub const PRICE_SCALE: f64 = 100_000.0;

const CURRENCY_USD: &str = "USD";

/// Scans the ticker list in source order and derives a `PriceResult` from
/// the first record whose market name equals `market` exactly
/// (case-sensitive). A full scan with no match is `MarketNotFound`.
pub fn resolve(tickers: &[TickerRecord], market: &str) -> Result<PriceResult, ResolveError> {
    for ticker in tickers {
        if ticker.market_name == market {
            return Ok(PriceResult {
                market: ticker.market_name.clone(),
                coin_id: ticker.base_asset.clone(),
                currency: String::from(CURRENCY_USD),
                price: fixed_point_usd(market, ticker.converted_usd)?,
                timestamp: ticker.timestamp.unix_timestamp(),
            });
        }
    }

    Err(ResolveError::MarketNotFound {
        market: market.to_owned(),
    })
}

/// Converts a USD float price to fixed-point units: `floor(usd * 100000)`,
/// clamped to the `u64` range.
///
/// Negative and non-finite inputs are upstream data defects; they fail
/// deterministically rather than inherit an undefined float-to-unsigned
/// conversion.
pub fn fixed_point_usd(market: &str, usd: f64) -> Result<u64, ResolveError> {
    if !usd.is_finite() || usd < 0.0 {
        return Err(ResolveError::PriceOutOfRange {
            market: market.to_owned(),
            value: usd,
        });
    }

    // `as` saturates on overflow, which is exactly the clamp contract.
    Ok((usd * PRICE_SCALE).floor() as u64)
}
