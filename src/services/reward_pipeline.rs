use crate::error::{ReportError, Result};
use crate::models::Profile;
use crate::services::cancellation::LoadTicket;
use crate::services::peer_api::PeerApi;
use crate::services::price_service::{annotate_prices, PriceApi};
use crate::services::report::RewardIndex;
use crate::services::reward_processor::reconstruct_rewards;
use crate::transaction_fetcher::{fetch_transactions, fetch_votes};
use log::info;

/// Runs every stage of a report load for one address, in order. Each stage
/// completes before the next starts and a superseded ticket stops the load
/// at the next stage boundary.
pub async fn build_reward_index(
    peer: &dyn PeerApi,
    prices: &dyn PriceApi,
    profile: &Profile,
    address: &str,
    ticket: &LoadTicket,
    lookup_concurrency: usize,
    now: i64,
) -> Result<RewardIndex> {
    info!("Loading staking rewards for {} (load {})", address, ticket.generation());

    let transactions = fetch_transactions(peer, address, ticket).await?;
    ensure_active(ticket)?;

    let votes = fetch_votes(peer, address, ticket, lookup_concurrency).await?;
    ensure_active(ticket)?;

    let rewards = reconstruct_rewards(&transactions, &votes, now)?;
    let priced = annotate_prices(prices, rewards, &profile.network.token, &profile.currency).await?;
    ensure_active(ticket)?;

    let index = RewardIndex::from_rewards(priced);
    info!(
        "Built reward index for {}: {} rewards in {} years",
        address,
        index.len(),
        index.years().len()
    );
    Ok(index)
}

fn ensure_active(ticket: &LoadTicket) -> Result<()> {
    if ticket.is_canceled() {
        Err(ReportError::Canceled)
    } else {
        Ok(())
    }
}
