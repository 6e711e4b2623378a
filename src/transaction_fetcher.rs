use crate::error::{ReportError, Result};
use crate::models::amount::parse_amount;
use crate::models::raw::{RawTransaction, TYPE_MULTI_PAYMENT, TYPE_TRANSFER};
use crate::models::{Transaction, Vote};
use crate::services::cancellation::LoadTicket;
use crate::services::delegate_resolver::resolve_delegate_names;
use crate::services::peer_api::{fetch_all_pages, PeerApi};
use log::{debug, info, warn};
use num_bigint::BigInt;
use num_traits::Zero;
use std::collections::{BTreeSet, HashMap};

pub async fn fetch_transactions(
    peer: &dyn PeerApi,
    address: &str,
    ticket: &LoadTicket,
) -> Result<Vec<Transaction>> {
    info!("Fetching received transactions for {}", address);
    let raw = fetch_all_pages(ticket, "transactions", |page, limit| {
        peer.fetch_transactions(address, page, limit)
    })
    .await?;

    let transactions = normalize_transactions(&raw, address)?;
    info!("Normalized {} transactions", transactions.len());
    Ok(transactions)
}

pub async fn fetch_votes(
    peer: &dyn PeerApi,
    address: &str,
    ticket: &LoadTicket,
    lookup_concurrency: usize,
) -> Result<Vec<Vote>> {
    info!("Fetching votes for {}", address);
    let raw = fetch_all_pages(ticket, "votes", |page, limit| {
        peer.fetch_votes(address, page, limit)
    })
    .await?;

    let delegate_keys = raw
        .iter()
        .map(|tx| split_vote(tx).map(|(key, _)| key.to_string()))
        .collect::<Result<BTreeSet<_>>>()?;

    if ticket.is_canceled() {
        return Err(ReportError::Canceled);
    }
    let names = resolve_delegate_names(peer, &delegate_keys, lookup_concurrency).await?;

    let votes = normalize_votes(&raw, &names)?;
    info!("Normalized {} votes", votes.len());
    Ok(votes)
}

pub fn normalize_transactions(raw: &[RawTransaction], address: &str) -> Result<Vec<Transaction>> {
    raw.iter().map(|tx| normalize_transaction(tx, address)).collect()
}

fn normalize_transaction(tx: &RawTransaction, address: &str) -> Result<Transaction> {
    let date = tx
        .unix_time()
        .ok_or_else(|| ReportError::malformed(&tx.id, "missing timestamp"))?;
    let type_ = tx
        .type_
        .ok_or_else(|| ReportError::malformed(&tx.id, "missing type"))?;

    let amount = match type_ {
        TYPE_TRANSFER => {
            let raw_amount = tx
                .amount
                .as_deref()
                .ok_or_else(|| ReportError::malformed(&tx.id, "missing amount"))?;
            parse_checked(raw_amount, &tx.id)?
        }
        TYPE_MULTI_PAYMENT => multi_payment_amount(tx, address)?,
        other => {
            warn!(
                "Unknown transaction type {} for transaction {}, counting zero",
                other, tx.id
            );
            BigInt::zero()
        }
    };

    Ok(Transaction {
        amount,
        date,
        transaction_id: tx.id.clone(),
        sender_public_key: tx.sender_public_key.clone(),
    })
}

/// The amount of the sub-payment addressed to `address`. When several
/// sub-payments target it, the last one wins; they are not summed.
fn multi_payment_amount(tx: &RawTransaction, address: &str) -> Result<BigInt> {
    let mut amount = BigInt::zero();
    let payments = tx.asset.as_ref().map(|a| a.payments.as_slice()).unwrap_or(&[]);

    for payment in payments.iter().filter(|p| p.recipient_id == address) {
        amount = parse_checked(&payment.amount, &tx.id)?;
    }

    debug!("Multi-payment {} contributes {}", tx.id, amount);
    Ok(amount)
}

fn parse_checked(raw: &str, id: &str) -> Result<BigInt> {
    parse_amount(raw).ok_or_else(|| ReportError::malformed(id, format!("invalid amount {}", raw)))
}

/// Splits the first vote entry into the delegate key and whether it revokes.
fn split_vote(tx: &RawTransaction) -> Result<(&str, bool)> {
    let vote = tx
        .asset
        .as_ref()
        .and_then(|a| a.votes.first())
        .ok_or_else(|| ReportError::malformed(&tx.id, "missing vote entry"))?;

    let mut chars = vote.chars();
    let sign = chars
        .next()
        .ok_or_else(|| ReportError::malformed(&tx.id, "empty vote entry"))?;

    Ok((chars.as_str(), sign == '-'))
}

pub fn normalize_votes(raw: &[RawTransaction], names: &HashMap<String, String>) -> Result<Vec<Vote>> {
    raw.iter()
        .map(|tx| {
            let (delegate_public_key, is_down_vote) = split_vote(tx)?;
            let date = tx
                .unix_time()
                .ok_or_else(|| ReportError::malformed(&tx.id, "missing timestamp"))?;
            let delegate_name = names
                .get(delegate_public_key)
                .cloned()
                .ok_or_else(|| ReportError::DelegateNotFound(delegate_public_key.to_string()))?;

            Ok(Vote {
                delegate_public_key: delegate_public_key.to_string(),
                delegate_name,
                date,
                is_down_vote,
            })
        })
        .collect()
}
