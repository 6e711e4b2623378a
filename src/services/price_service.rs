use crate::error::{ReportError, Result};
use crate::models::datetime_utils::{day_index, format_date, SECONDS_PER_DAY};
use crate::models::{AttributedReward, HistoDayResponse, PricePoint, PricedReward};
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

#[async_trait]
pub trait PriceApi: Send + Sync {
    /// Daily close prices for the `limit` days up to `to_ts`.
    async fn fetch_daily_prices(
        &self,
        from_token: &str,
        to_fiat: &str,
        to_ts: i64,
        limit: i64,
    ) -> Result<Vec<PricePoint>>;
}

#[derive(Clone)]
pub struct HttpPriceClient {
    client: Client,
    base_url: String,
}

impl HttpPriceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceApi for HttpPriceClient {
    async fn fetch_daily_prices(
        &self,
        from_token: &str,
        to_fiat: &str,
        to_ts: i64,
        limit: i64,
    ) -> Result<Vec<PricePoint>> {
        let url = format!("{}/histoday", self.base_url);
        info!(
            "Fetching {} daily {}/{} prices up to {}",
            limit, from_token, to_fiat, to_ts
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fsym", from_token.to_string()),
                ("tsym", to_fiat.to_string()),
                ("toTs", to_ts.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: HistoDayResponse = response.json().await?;
        if body.response.as_deref() == Some("Error") {
            let message = body.message.unwrap_or_default();
            error!("Price API error: {}", message);
            return Err(ReportError::Network(format!("price API error: {}", message)));
        }

        body.data
            .and_then(|data| data.into_points())
            .ok_or_else(|| ReportError::Network("price API returned no data".to_string()))
    }
}

/// Number of days the price series has to reach back from `to` to cover
/// `from`.
pub fn days_to_cover(from: i64, to: i64) -> i64 {
    let span = (to - from).max(0);
    (span + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Attaches the close price of its UTC day to every reward. The rewards are
/// returned in date order. One price request covers the whole range; an empty
/// input makes no request.
pub async fn annotate_prices(
    prices: &dyn PriceApi,
    mut rewards: Vec<AttributedReward>,
    token: &str,
    currency: &str,
) -> Result<Vec<PricedReward>> {
    rewards.sort_by_key(|r| r.transaction.date);

    let (from, to) = match (rewards.first(), rewards.last()) {
        (Some(first), Some(last)) => (first.transaction.date, last.transaction.date),
        _ => return Ok(Vec::new()),
    };

    let series = prices
        .fetch_daily_prices(token, currency, to, days_to_cover(from, to))
        .await?;
    info!("Fetched {} price points", series.len());

    let close_by_day: HashMap<i64, f64> = series
        .iter()
        .map(|point| (day_index(point.time), point.close))
        .collect();

    rewards
        .into_iter()
        .map(|reward| {
            let day = day_index(reward.transaction.date);
            let close_price = close_by_day.get(&day).copied().ok_or_else(|| {
                warn!(
                    "No {}/{} close for transaction {}",
                    token, currency, reward.transaction.transaction_id
                );
                ReportError::MissingPrice(format!(
                    "{}/{} on {}",
                    token,
                    currency,
                    format_date(reward.transaction.date)
                ))
            })?;
            Ok(PricedReward {
                reward,
                close_price,
            })
        })
        .collect()
}
