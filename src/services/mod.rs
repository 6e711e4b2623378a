pub mod cancellation;
pub mod delegate_resolver;
pub mod host;
pub mod peer_api;
pub mod price_service;
pub mod report;
pub mod reward_pipeline;
pub mod reward_processor;
pub mod session;
