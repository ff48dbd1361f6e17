use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::store::SharedStore;

/// Periodically removes expired groups. Expiry is only enforced here; reads
/// never check `expires_at`.
pub fn spawn_expiry_sweeper(store: SharedStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一次 tick 立即返回，跳过
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let cleaned = store.lock().await.cleanup_expired_groups();
            tracing::debug!("Expiry sweep finished, {} groups removed", cleaned);
        }
    })
}
