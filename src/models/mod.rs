pub mod amount;
pub mod datetime_utils;
mod price;
mod profile;
pub mod raw;
mod reward;
mod transaction;
mod vote;

pub use price::{HistoDayData, HistoDayResponse, PricePoint};
pub use profile::{Network, Profile, Settings, Wallet};
pub use reward::{AttributedReward, PricedReward};
pub use transaction::Transaction;
pub use vote::Vote;
