//! Page Cache Sweep Task
//!
//! Background task that periodically removes expired page cache entries, so
//! the map does not grow unboundedly between requests.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::PageCache;

/// Spawns a background task that periodically sweeps expired pages.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweep runs.
///
/// # Arguments
/// * `page_cache` - Page cache to sweep
/// * `sweep_interval_secs` - Interval in seconds between sweep runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_page_sweep_task(page_cache: PageCache, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting page sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = page_cache.sweep_expired().await;

            if removed > 0 {
                info!("Page sweep: removed {} expired pages", removed);
            } else {
                debug!("Page sweep: no expired pages found");
            }
        }
    })
}
