use crate::models::datetime_utils::{format_date, year_of};
use crate::models::{Profile, PricedReward};
use crate::utils::helpers::{is_crypto, token_amount};
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

/// Priced rewards grouped by UTC calendar year. Built once per load and
/// never updated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardIndex {
    years: BTreeMap<String, Vec<PricedReward>>,
}

impl RewardIndex {
    pub fn from_rewards(rewards: Vec<PricedReward>) -> Self {
        let mut years: BTreeMap<String, Vec<PricedReward>> = BTreeMap::new();
        for reward in rewards {
            years.entry(year_of(reward.date())).or_default().push(reward);
        }
        Self { years }
    }

    pub fn years(&self) -> Vec<String> {
        self.years.keys().cloned().collect()
    }

    pub fn rewards(&self, year: &str) -> &[PricedReward] {
        self.years.get(year).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn fiat_sum(&self, year: &str, currency: &str) -> f64 {
        self.rewards(year)
            .iter()
            .map(|reward| fiat_value(reward, currency))
            .sum()
    }
}

/// Amount times close price. The amount is scaled down to whole tokens
/// unless the display currency is itself a cryptocurrency.
pub fn fiat_value(reward: &PricedReward, currency: &str) -> f64 {
    display_amount(reward, currency) * reward.close_price
}

fn display_amount(reward: &PricedReward, currency: &str) -> f64 {
    let amount = &reward.reward.transaction.amount;
    if is_crypto(currency) {
        amount.to_f64().unwrap_or(0.0)
    } else {
        token_amount(amount)
    }
}

pub fn export_header(profile: &Profile) -> String {
    format!(
        "{} Amount | {} Value | Date | Transaction ID",
        profile.network.token, profile.currency
    )
}

pub fn export_row(profile: &Profile, reward: &PricedReward) -> String {
    let value = fiat_value(reward, &profile.currency);
    let value = if is_crypto(&profile.currency) {
        format!("{:.8}", value)
    } else {
        format!("{:.2}", value)
    };

    format!(
        "{:.8} | {} | {} | {}",
        token_amount(&reward.reward.transaction.amount),
        value,
        format_date(reward.date()),
        reward.reward.transaction.transaction_id
    )
}

pub fn export_document(profile: &Profile, index: &RewardIndex, year: &str) -> String {
    std::iter::once(export_header(profile))
        .chain(index.rewards(year).iter().map(|r| export_row(profile, r)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(address: &str, year: &str) -> String {
    format!("stacking_reward_report_{}_{}.csv", address, year)
}
