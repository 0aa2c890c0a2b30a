use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::ttl::TtlCache;

/// Spawns a task that sweeps `cache` every `interval`.
///
/// The task holds only a weak reference and exits once the cache is dropped.
pub fn spawn_sweeper<K, V>(cache: Arc<TtlCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let cache = Arc::downgrade(&cache);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(cache) = cache.upgrade() else {
                debug!("Cache dropped, stopping sweeper");
                break;
            };

            let removed = cache.sweep();
            if removed > 0 {
                debug!(removed, remaining = cache.len(), "Swept expired cache entries");
            }
        }
    })
}
