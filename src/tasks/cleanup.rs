//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from a
//! [`MemoryStore`]. Reads already hide expired entries; the sweep only
//! reclaims memory held by keys nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::Config;
use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired entries.
///
/// # Arguments
/// * `store` - Handle to the in-process store (clones share state)
/// * `config` - Supplies `cleanup_interval`, the seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// at shutdown.
///
/// # Example
/// ```ignore
/// let store = MemoryStore::new();
/// let cleanup_handle = spawn_cleanup_task(store.clone(), &Config::from_env());
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(store: MemoryStore, config: &Config) -> JoinHandle<()> {
    let interval = Duration::from_secs(config.cleanup_interval.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
