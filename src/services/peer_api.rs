use crate::config::PAGE_SIZE;
use crate::error::{ReportError, Result};
use crate::models::raw::{Page, RawDelegate, RawTransaction};
use crate::services::cancellation::LoadTicket;
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

#[async_trait]
pub trait PeerApi: Send + Sync {
    async fn fetch_transactions(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<RawTransaction>>;

    async fn fetch_votes(&self, address: &str, page: u32, limit: u32)
        -> Result<Page<RawTransaction>>;

    async fn fetch_delegates(&self, public_key: &str) -> Result<Page<RawDelegate>>;
}

#[derive(Clone)]
pub struct HttpPeerClient {
    client: Client,
    base_url: String,
}

impl HttpPeerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        info!("Connecting to peer {}...", base_url);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        info!("Querying peer: {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Peer request {} failed with status {}", url, status);
            return Err(ReportError::Network(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PeerApi for HttpPeerClient {
    async fn fetch_transactions(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<RawTransaction>> {
        let path = format!("wallets/{}/transactions/received", address);
        self.get_json(
            &path,
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn fetch_votes(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<RawTransaction>> {
        let path = format!("wallets/{}/votes", address);
        self.get_json(
            &path,
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn fetch_delegates(&self, public_key: &str) -> Result<Page<RawDelegate>> {
        self.get_json("delegates", &[("publicKey", public_key.to_string())])
            .await
    }
}

/// Walks pages starting at 1 until the peer returns an empty page or the
/// ticket is superseded.
pub async fn fetch_all_pages<T, F, Fut>(ticket: &LoadTicket, label: &str, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(page, PAGE_SIZE).await?.data;
        if batch.is_empty() {
            info!("No more {} to fetch after page {}", label, page - 1);
            break;
        }
        info!("Fetched {} {} on page {}", batch.len(), label, page);
        all.extend(batch);
        page += 1;

        if ticket.is_canceled() {
            info!("Stopped fetching {}: load superseded", label);
            return Err(ReportError::Canceled);
        }
    }

    info!("Total {} fetched: {}", label, all.len());
    Ok(all)
}
