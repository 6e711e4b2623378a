use dotenv::dotenv;
use log::{info, warn};
use staking_reward_report::config::{env_flag, Config};
use staking_reward_report::error::ReportError;
use staking_reward_report::repositories::export_repository::ExportRepository;
use staking_reward_report::repositories::profile_repository::ProfileRepository;
use staking_reward_report::repositories::settings_repository::SettingsRepository;
use staking_reward_report::services::host::{HostContext, LogAlertSink, ProfileProvider};
use staking_reward_report::services::peer_api::HttpPeerClient;
use staking_reward_report::services::price_service::HttpPriceClient;
use staking_reward_report::services::report::fiat_value;
use staking_reward_report::services::session::{Command, ReportSession};
use staking_reward_report::utils::helpers::token_amount;
use std::env;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    info!("Starting staking reward report");
    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let profiles = Arc::new(ProfileRepository::new(&config.profile_path));
    let host = HostContext {
        peer: Arc::new(HttpPeerClient::new(&config.peer_api_url, timeout)?),
        prices: Arc::new(HttpPriceClient::new(&config.price_api_url, timeout)?),
        profiles: profiles.clone(),
        settings: Arc::new(SettingsRepository::new(&config.settings_path)),
        exports: Arc::new(ExportRepository::new(&config.export_dir)),
        alerts: Arc::new(LogAlertSink),
    };
    let session = ReportSession::new(host, config.delegate_lookup_concurrency);

    if !session.has_accepted_disclaimer() {
        warn!("Reported values are estimates and not tax advice");
        if config.accept_disclaimer {
            session.handle(Command::AcceptDisclaimer).await;
        } else {
            warn!("Set REPORT_ACCEPT_DISCLAIMER=1 to acknowledge this notice");
        }
    }

    match env::var("REPORT_ADDRESS") {
        Ok(address) => session.handle(Command::AddressChanged(address)).await,
        Err(_) => session.start().await,
    }
    if let Ok(year) = env::var("REPORT_YEAR") {
        session.handle(Command::YearChanged(year)).await;
    }

    let view = session.view().await;
    if view.address.is_empty() {
        return Err(ReportError::NoWalletFound.into());
    }

    let currency = profiles.current_profile()?.currency;
    info!(
        "{} staking rewards for {} in {} (available years: {:?})",
        view.rewards.len(),
        view.address,
        view.year,
        view.years
    );
    for reward in &view.rewards {
        info!(
            "{} | {} | {:.8} tokens | {:.2} {}",
            reward.reward.transaction.transaction_id,
            reward.reward.delegate_name,
            token_amount(&reward.reward.transaction.amount),
            fiat_value(reward, &currency),
            currency
        );
    }
    if let Some(sum) = view.reward_sum {
        info!("Received staking rewards: {:.2} {}", sum, currency);
    }

    if env_flag("REPORT_EXPORT") {
        session.handle(Command::Export).await;
    }

    info!("Report complete");
    Ok(())
}
