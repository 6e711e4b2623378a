use crate::error::{ReportError, Result};
use crate::models::datetime_utils::current_year;
use crate::models::{PricedReward, Profile, Wallet};
use crate::services::cancellation::{LoadGeneration, LoadTicket};
use crate::services::host::HostContext;
use crate::services::report::{export_document, export_file_name, RewardIndex};
use crate::services::reward_pipeline::build_reward_index;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddressChanged(String),
    YearChanged(String),
    Reload,
    Export,
    ShowInfo,
    CloseInfo,
    AcceptDisclaimer,
}

/// What a front end needs to draw the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub address: String,
    pub year: String,
    pub years: Vec<String>,
    pub rewards: Vec<PricedReward>,
    pub reward_sum: Option<f64>,
    pub is_loading: bool,
    pub show_info: bool,
    pub has_accepted_disclaimer: bool,
}

struct SessionState {
    address: String,
    year: String,
    currency: String,
    index: Arc<RewardIndex>,
    reward_sum: Option<f64>,
    is_loading: bool,
    show_info: bool,
}

impl SessionState {
    fn refresh_sum(&mut self) {
        self.reward_sum = Some(self.index.fiat_sum(&self.year, &self.currency));
    }
}

/// The report of one wallet at a time. Commands may be dispatched
/// concurrently; a load only commits if no newer load started and the
/// selected address still matches.
pub struct ReportSession {
    host: HostContext,
    lookup_concurrency: usize,
    generation: LoadGeneration,
    clock: Clock,
    state: Mutex<SessionState>,
}

impl ReportSession {
    pub fn new(host: HostContext, lookup_concurrency: usize) -> Self {
        Self {
            host,
            lookup_concurrency,
            generation: LoadGeneration::new(),
            clock: Arc::new(|| Utc::now().timestamp()),
            state: Mutex::new(SessionState {
                address: String::new(),
                year: current_year(),
                currency: String::new(),
                index: Arc::new(RewardIndex::default()),
                reward_sum: None,
                is_loading: false,
                show_info: false,
            }),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Loads the address remembered from the previous session, or the first
    /// wallet of the profile.
    pub async fn start(&self) {
        match self.host.settings.selected_address() {
            Ok(address) => self.change_address(address.unwrap_or_default()).await,
            Err(e) => self.alert(&e),
        }
    }

    pub async fn handle(&self, command: Command) {
        info!("Handling {:?}", command);
        match command {
            Command::AddressChanged(address) => {
                if let Err(e) = self.host.settings.persist_selected_address(&address) {
                    self.alert(&e);
                }
                self.change_address(address).await;
            }
            Command::YearChanged(year) => {
                let mut state = self.state.lock().await;
                state.year = year;
                state.refresh_sum();
            }
            Command::Reload => {
                let address = self.state.lock().await.address.clone();
                self.change_address(address).await;
            }
            Command::Export => {
                if let Err(e) = self.export().await {
                    self.alert(&e);
                }
            }
            Command::ShowInfo => self.state.lock().await.show_info = true,
            Command::CloseInfo => self.state.lock().await.show_info = false,
            Command::AcceptDisclaimer => {
                if let Err(e) = self.host.settings.accept_disclaimer() {
                    self.alert(&e);
                }
            }
        }
    }

    pub async fn view(&self) -> ReportView {
        let has_accepted_disclaimer = self.has_accepted_disclaimer();
        let state = self.state.lock().await;
        ReportView {
            address: state.address.clone(),
            year: state.year.clone(),
            years: state.index.years(),
            rewards: state.index.rewards(&state.year).to_vec(),
            reward_sum: state.reward_sum,
            is_loading: state.is_loading,
            show_info: state.show_info,
            has_accepted_disclaimer,
        }
    }

    /// An unreadable settings store counts as not accepted.
    pub fn has_accepted_disclaimer(&self) -> bool {
        match self.host.settings.has_accepted_disclaimer() {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Could not read disclaimer state: {}", e);
                self.alert(&e);
                false
            }
        }
    }

    async fn change_address(&self, requested: String) {
        let profile = match self.host.profiles.current_profile() {
            Ok(profile) => profile,
            Err(e) => return self.alert(&e),
        };
        let wallet = match self.resolve_wallet(&profile, &requested) {
            Ok(wallet) => wallet,
            Err(e) => return self.alert(&e),
        };

        let ticket = {
            let mut state = self.state.lock().await;
            state.address = wallet.address.clone();
            state.is_loading = true;
            self.generation.next_ticket()
        };

        let result = build_reward_index(
            self.host.peer.as_ref(),
            self.host.prices.as_ref(),
            &profile,
            &wallet.address,
            &ticket,
            self.lookup_concurrency,
            (self.clock)(),
        )
        .await;

        self.commit(&ticket, &wallet.address, &profile, result).await;
    }

    fn resolve_wallet(&self, profile: &Profile, requested: &str) -> Result<Wallet> {
        if let Some(wallet) = profile.wallet(requested) {
            return Ok(wallet.clone());
        }

        let fallback = profile.wallets.first().cloned().ok_or(ReportError::NoWalletFound)?;
        warn!(
            "Wallet {:?} is not in the profile, falling back to {}",
            requested, fallback.address
        );
        self.host.settings.persist_selected_address(&fallback.address)?;
        Ok(fallback)
    }

    async fn commit(
        &self,
        ticket: &LoadTicket,
        address: &str,
        profile: &Profile,
        result: Result<RewardIndex>,
    ) {
        let mut state = self.state.lock().await;
        if ticket.is_canceled() || state.address != address {
            info!("Discarding superseded load {} for {}", ticket.generation(), address);
            return;
        }

        state.is_loading = false;
        match result {
            Ok(index) => {
                state.index = Arc::new(index);
                state.currency = profile.currency.clone();
                state.refresh_sum();
                info!("Installed reward index for {}", address);
            }
            Err(e) => {
                drop(state);
                self.alert(&e);
            }
        }
    }

    async fn export(&self) -> Result<()> {
        let profile = self.host.profiles.current_profile()?;
        let (address, year, index) = {
            let state = self.state.lock().await;
            (state.address.clone(), state.year.clone(), Arc::clone(&state.index))
        };

        let content = export_document(&profile, &index, &year);
        let saved = self
            .host
            .exports
            .save_text(&content, &export_file_name(&address, &year), "csv")?;

        if let Some(path) = saved {
            self.host
                .alerts
                .success(&format!("Your report was saved at: {}", path.display()));
        }
        Ok(())
    }

    fn alert(&self, error: &ReportError) {
        if matches!(error, ReportError::Canceled) {
            info!("Load canceled");
            return;
        }
        self.host.alerts.error(&error.to_string());
    }
}
