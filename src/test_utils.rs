//! In-memory stand-ins for the peer, the price feed and the host runtime.

use crate::error::{ReportError, Result};
use crate::models::raw::{
    Page, RawAsset, RawDelegate, RawPayment, RawTimestamp, RawTransaction, TYPE_MULTI_PAYMENT,
    TYPE_TRANSFER,
};
use crate::models::{
    AttributedReward, Network, PricePoint, PricedReward, Profile, Settings, Transaction, Vote,
    Wallet,
};
use crate::services::host::{
    AlertSink, ExportSink, HostContext, ProfileProvider, SettingsStore,
};
use crate::services::peer_api::PeerApi;
use crate::services::price_service::PriceApi;
use async_trait::async_trait;
use num_bigint::BigInt;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn raw_transfer(id: &str, sender: &str, amount: &str, date: i64) -> RawTransaction {
    RawTransaction {
        id: id.to_string(),
        type_: Some(TYPE_TRANSFER),
        amount: Some(amount.to_string()),
        sender_public_key: sender.to_string(),
        timestamp: Some(RawTimestamp { unix: Some(date) }),
        asset: None,
    }
}

pub fn raw_multi_payment(
    id: &str,
    sender: &str,
    payments: &[(&str, &str)],
    date: i64,
) -> RawTransaction {
    RawTransaction {
        id: id.to_string(),
        type_: Some(TYPE_MULTI_PAYMENT),
        amount: Some("0".to_string()),
        sender_public_key: sender.to_string(),
        timestamp: Some(RawTimestamp { unix: Some(date) }),
        asset: Some(RawAsset {
            payments: payments
                .iter()
                .map(|(recipient, amount)| RawPayment {
                    recipient_id: recipient.to_string(),
                    amount: amount.to_string(),
                })
                .collect(),
            votes: Vec::new(),
        }),
    }
}

pub fn raw_vote(id: &str, vote: &str, date: i64) -> RawTransaction {
    RawTransaction {
        id: id.to_string(),
        type_: Some(3),
        amount: Some("0".to_string()),
        sender_public_key: "pk-voter".to_string(),
        timestamp: Some(RawTimestamp { unix: Some(date) }),
        asset: Some(RawAsset {
            payments: Vec::new(),
            votes: vec![vote.to_string()],
        }),
    }
}

pub fn tx(id: &str, sender: &str, amount: i64, date: i64) -> Transaction {
    Transaction {
        amount: BigInt::from(amount),
        date,
        transaction_id: id.to_string(),
        sender_public_key: sender.to_string(),
    }
}

fn vote(delegate: &str, date: i64, is_down_vote: bool) -> Vote {
    Vote {
        delegate_public_key: delegate.to_string(),
        delegate_name: format!("{}-name", delegate),
        date,
        is_down_vote,
    }
}

pub fn up(delegate: &str, date: i64) -> Vote {
    vote(delegate, date, false)
}

pub fn down(delegate: &str, date: i64) -> Vote {
    vote(delegate, date, true)
}

pub fn attributed(id: &str, amount: i64, date: i64) -> AttributedReward {
    AttributedReward {
        transaction: tx(id, "pk-x", amount, date),
        delegate_name: "xavier".to_string(),
    }
}

pub fn priced(id: &str, amount: i64, date: i64, close_price: f64) -> PricedReward {
    PricedReward {
        reward: attributed(id, amount, date),
        close_price,
    }
}

pub fn profile(currency: &str, wallets: &[&str]) -> Profile {
    Profile {
        language: "en".to_string(),
        currency: currency.to_string(),
        network: Network {
            token: "ARK".to_string(),
        },
        wallets: wallets
            .iter()
            .map(|address| Wallet {
                address: address.to_string(),
                balance: None,
            })
            .collect(),
    }
}

pub fn host(
    peer: Arc<dyn PeerApi>,
    prices: Arc<dyn PriceApi>,
    profiles: Arc<dyn ProfileProvider>,
    settings: Arc<dyn SettingsStore>,
    exports: Arc<dyn ExportSink>,
    alerts: Arc<dyn AlertSink>,
) -> HostContext {
    HostContext {
        peer,
        prices,
        profiles,
        settings,
        exports,
        alerts,
    }
}

#[derive(Default)]
struct PeerData {
    transactions: Vec<RawTransaction>,
    votes: Vec<RawTransaction>,
    delegates: HashMap<String, String>,
}

/// Serves the same history for every address, paginated like the peer.
#[derive(Clone, Default)]
pub struct FakePeer {
    data: Arc<Mutex<PeerData>>,
    delegate_lookups: Arc<AtomicUsize>,
    votes_fail: Arc<AtomicBool>,
    gated_address: Option<String>,
    gate_open: Arc<AtomicBool>,
    gate: Arc<Notify>,
}

impl FakePeer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(self, transactions: Vec<RawTransaction>) -> Self {
        self.data.lock().unwrap().transactions = transactions;
        self
    }

    pub fn with_votes(self, votes: Vec<RawTransaction>) -> Self {
        self.data.lock().unwrap().votes = votes;
        self
    }

    pub fn with_delegate(self, public_key: &str, username: &str) -> Self {
        self.data
            .lock()
            .unwrap()
            .delegates
            .insert(public_key.to_string(), username.to_string());
        self
    }

    /// Requests for `address` block until [`FakePeer::open_gate`] is called.
    pub fn with_gate(mut self, address: &str) -> Self {
        self.gated_address = Some(address.to_string());
        self
    }

    pub fn open_gate(&self) {
        self.gate_open.store(true, Ordering::SeqCst);
        self.gate.notify_one();
    }

    pub fn fail_votes(&self) {
        self.votes_fail.store(true, Ordering::SeqCst);
    }

    pub fn delegate_lookups(&self) -> usize {
        self.delegate_lookups.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self, address: &str) {
        if self.gated_address.as_deref() == Some(address) && !self.gate_open.load(Ordering::SeqCst)
        {
            self.gate.notified().await;
        }
    }
}

fn page_of(items: &[RawTransaction], page: u32, limit: u32) -> Page<RawTransaction> {
    let start = ((page - 1) * limit) as usize;
    let data = items
        .iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();
    Page { data }
}

#[async_trait]
impl PeerApi for FakePeer {
    async fn fetch_transactions(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<RawTransaction>> {
        self.wait_for_gate(address).await;
        let data = self.data.lock().unwrap();
        Ok(page_of(&data.transactions, page, limit))
    }

    async fn fetch_votes(
        &self,
        address: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<RawTransaction>> {
        self.wait_for_gate(address).await;
        if self.votes_fail.load(Ordering::SeqCst) {
            return Err(ReportError::Network("votes endpoint unavailable".to_string()));
        }
        let data = self.data.lock().unwrap();
        Ok(page_of(&data.votes, page, limit))
    }

    async fn fetch_delegates(&self, public_key: &str) -> Result<Page<RawDelegate>> {
        self.delegate_lookups.fetch_add(1, Ordering::SeqCst);
        let data = self.data.lock().unwrap();
        let found = data
            .delegates
            .get(public_key)
            .map(|username| RawDelegate {
                username: username.clone(),
            });
        Ok(Page {
            data: found.into_iter().collect(),
        })
    }
}

pub struct FakePrices {
    series: Vec<PricePoint>,
    requests: Mutex<Vec<(String, String, i64, i64)>>,
}

impl FakePrices {
    pub fn new(series: Vec<PricePoint>) -> Self {
        Self {
            series,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, String, i64, i64)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceApi for FakePrices {
    async fn fetch_daily_prices(
        &self,
        from_token: &str,
        to_fiat: &str,
        to_ts: i64,
        limit: i64,
    ) -> Result<Vec<PricePoint>> {
        self.requests.lock().unwrap().push((
            from_token.to_string(),
            to_fiat.to_string(),
            to_ts,
            limit,
        ));
        Ok(self.series.clone())
    }
}

pub struct StaticProfile(pub Profile);

impl ProfileProvider for StaticProfile {
    fn current_profile(&self) -> Result<Profile> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct MemorySettings {
    settings: Mutex<Settings>,
    reads_fail: AtomicBool,
}

impl MemorySettings {
    pub fn address(&self) -> Option<String> {
        self.settings.lock().unwrap().selected_address.clone()
    }

    pub fn fail_reads(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
    }
}

impl SettingsStore for MemorySettings {
    fn selected_address(&self) -> Result<Option<String>> {
        Ok(self.address())
    }

    fn persist_selected_address(&self, address: &str) -> Result<()> {
        self.settings.lock().unwrap().selected_address = Some(address.to_string());
        Ok(())
    }

    fn has_accepted_disclaimer(&self) -> Result<bool> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "settings unavailable",
            )));
        }
        Ok(self.settings.lock().unwrap().has_accepted_disclaimer)
    }

    fn accept_disclaimer(&self) -> Result<()> {
        self.settings.lock().unwrap().has_accepted_disclaimer = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryExports {
    saved: Mutex<Vec<(String, String)>>,
}

impl MemoryExports {
    pub fn saved(&self) -> Vec<(String, String)> {
        self.saved.lock().unwrap().clone()
    }
}

impl ExportSink for MemoryExports {
    fn save_text(&self, content: &str, file_name: &str, _extension: &str) -> Result<Option<PathBuf>> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_string()));
        Ok(Some(PathBuf::from("/exports").join(file_name)))
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }
}
