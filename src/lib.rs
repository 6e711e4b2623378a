pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod transaction_fetcher;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
