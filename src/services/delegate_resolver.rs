use crate::error::{ReportError, Result};
use crate::services::peer_api::PeerApi;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

/// Resolves each distinct delegate key to its username with at most
/// `concurrency` lookups in flight. Any failed lookup fails the batch.
pub async fn resolve_delegate_names(
    peer: &dyn PeerApi,
    public_keys: &BTreeSet<String>,
    concurrency: usize,
) -> Result<HashMap<String, String>> {
    info!(
        "Resolving {} delegate names (concurrency {})",
        public_keys.len(),
        concurrency
    );

    let names = stream::iter(public_keys.iter())
        .map(|public_key| async move {
            let name = lookup_delegate(peer, public_key).await?;
            Ok::<_, ReportError>((public_key.clone(), name))
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect::<HashMap<_, _>>()
        .await?;

    Ok(names)
}

async fn lookup_delegate(peer: &dyn PeerApi, public_key: &str) -> Result<String> {
    let response = peer.fetch_delegates(public_key).await?;
    let delegate = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ReportError::DelegateNotFound(public_key.to_string()))?;
    debug!("Delegate {} is {}", public_key, delegate.username);
    Ok(delegate.username)
}
