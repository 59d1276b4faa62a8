//! Age Sweep Task
//!
//! Background task that periodically removes cache entries that have not
//! been accessed within the configured maximum age.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ImageCache;

/// Spawns a background task that periodically sweeps stale cache entries.
///
/// The task runs in an infinite loop, sleeping for `sweep_interval_secs`
/// between runs. Each run drops every entry whose last access is older than
/// `max_age_secs`, deleting the backing files best-effort.
///
/// # Arguments
/// * `cache` - Shared image cache
/// * `sweep_interval_secs` - Interval in seconds between sweep runs
/// * `max_age_secs` - Maximum entry age in seconds
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(
    cache: Arc<ImageCache>,
    sweep_interval_secs: u64,
    max_age_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);
    let max_age = Duration::from_secs(max_age_secs);

    tokio::spawn(async move {
        info!(
            "Starting age sweep task: interval {}s, max age {}s",
            sweep_interval_secs, max_age_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_older_than(max_age).await;

            if removed > 0 {
                info!("Age sweep: removed {} stale entries", removed);
            } else {
                debug!("Age sweep: no stale entries found");
            }
        }
    })
}
