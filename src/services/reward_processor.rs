use crate::error::{ReportError, Result};
use crate::models::{AttributedReward, Transaction, Vote};
use log::{debug, info};

/// A half-open span `[start, end)` during which the wallet's vote for one
/// delegate was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingInterval {
    pub delegate_public_key: String,
    pub delegate_name: String,
    pub start: i64,
    pub end: i64,
}

impl VotingInterval {
    pub fn contains(&self, transaction: &Transaction) -> bool {
        self.start <= transaction.date
            && transaction.date < self.end
            && transaction.sender_public_key == self.delegate_public_key
    }
}

/// Rebuilds the voting intervals of a wallet from its vote history.
///
/// Votes may arrive in any order (the peer API lists the newest first); they
/// are scanned chronologically. A vote that is never revoked stays active
/// until `now`. A down-vote only closes an up-vote that precedes it.
pub fn voting_intervals(votes: &[Vote], now: i64) -> Result<Vec<VotingInterval>> {
    let mut timeline: Vec<&Vote> = votes.iter().collect();
    timeline.sort_by_key(|vote| vote.date);

    let last_vote_time = match timeline.last() {
        Some(vote) => vote.date,
        None => return Ok(Vec::new()),
    };

    let mut intervals = Vec::new();
    let mut since = 0;

    while since < last_vote_time {
        let up_vote = timeline
            .iter()
            .find(|vote| !vote.is_down_vote && vote.date > since)
            .ok_or_else(|| {
                ReportError::MalformedVoteHistory(format!(
                    "no up-vote after {} although votes continue until {}",
                    since, last_vote_time
                ))
            })?;

        let down_vote = timeline.iter().find(|vote| {
            vote.is_down_vote
                && vote.delegate_public_key == up_vote.delegate_public_key
                && vote.date > up_vote.date
        });
        let down_vote_time = down_vote.map(|vote| vote.date).unwrap_or(now);

        if down_vote_time <= up_vote.date {
            return Err(ReportError::MalformedVoteHistory(format!(
                "vote for {} at {} lies after the current time {}",
                up_vote.delegate_name, up_vote.date, now
            )));
        }

        debug!(
            "Voting interval for {}: [{}, {})",
            up_vote.delegate_name, up_vote.date, down_vote_time
        );
        intervals.push(VotingInterval {
            delegate_public_key: up_vote.delegate_public_key.clone(),
            delegate_name: up_vote.delegate_name.clone(),
            start: up_vote.date,
            end: down_vote_time,
        });

        since = down_vote_time;
    }

    Ok(intervals)
}

/// Attributes incoming transactions to the delegate whose vote was active
/// when they arrived. Output is ordered by interval, then by the order of
/// `transactions`.
pub fn reconstruct_rewards(
    transactions: &[Transaction],
    votes: &[Vote],
    now: i64,
) -> Result<Vec<AttributedReward>> {
    let intervals = voting_intervals(votes, now)?;

    let rewards: Vec<AttributedReward> = intervals
        .iter()
        .flat_map(|interval| {
            transactions
                .iter()
                .filter(move |tx| interval.contains(tx))
                .map(move |tx| AttributedReward {
                    transaction: tx.clone(),
                    delegate_name: interval.delegate_name.clone(),
                })
        })
        .collect();

    info!(
        "Attributed {} of {} transactions across {} voting intervals",
        rewards.len(),
        transactions.len(),
        intervals.len()
    );
    Ok(rewards)
}
