//! Relay pipeline.
//!
//! One run fetches the feed, stores entries that were never seen before and
//! delivers every post still marked unsent.

use std::sync::Arc;

use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::{DeliveryPolicy, RelayConfig};
use crate::db::Database;
use crate::error::Result;
use crate::feed::FeedSource;
use crate::notify::{format_message, Notifier};
use crate::store::PostRepository;

/// Counters for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Entries returned by the feed.
    pub fetched: usize,
    /// Entries stored for the first time.
    pub inserted: usize,
    /// Entries already present in the store.
    pub duplicates: usize,
    /// Posts whose delivery was confirmed.
    pub sent: usize,
    /// Posts whose delivery failed.
    pub failed: usize,
}

/// Feed-to-channel relay.
pub struct Relay {
    db: Database,
    source: Arc<dyn FeedSource>,
    notifier: Arc<dyn Notifier>,
    feed_url: String,
    send_delay: Duration,
    max_posts_per_run: usize,
    delivery_policy: DeliveryPolicy,
}

impl Relay {
    /// Create a relay for `feed_url` using the given collaborators.
    pub fn new(
        db: Database,
        source: Arc<dyn FeedSource>,
        notifier: Arc<dyn Notifier>,
        feed_url: impl Into<String>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            db,
            source,
            notifier,
            feed_url: feed_url.into(),
            send_delay: Duration::from_millis(config.send_delay_ms),
            max_posts_per_run: config.max_posts_per_run,
            delivery_policy: config.delivery_policy,
        }
    }

    /// Execute the pipeline once.
    ///
    /// Delivery failures are counted in the report. Feed and store failures
    /// abort the run.
    pub async fn run_once(&self) -> Result<RunReport> {
        let repo = PostRepository::new(self.db.pool());
        let mut report = RunReport::default();

        let entries = self.source.fetch(&self.feed_url).await?;
        report.fetched = entries.len();

        let inserted = repo.insert_new(&entries).await?;
        report.inserted = inserted.inserted;
        report.duplicates = inserted.duplicates;
        debug!(
            "Stored {} new post(s), {} duplicate(s)",
            inserted.inserted, inserted.duplicates
        );

        let pending = if self.max_posts_per_run > 0 {
            repo.find_unsent_limited(self.max_posts_per_run).await?
        } else {
            repo.find_unsent().await?
        };

        for (index, post) in pending.iter().enumerate() {
            if index > 0 && !self.send_delay.is_zero() {
                sleep(self.send_delay).await;
            }

            match self.notifier.send(&format_message(post)).await {
                Ok(()) => {
                    repo.mark_sent(&post.id).await?;
                    report.sent += 1;
                    debug!("Relayed post {}", post.id);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("Failed to relay post {}: {}", post.id, e);
                    match self.delivery_policy {
                        DeliveryPolicy::Confirmed => repo.record_failure(&post.id).await?,
                        DeliveryPolicy::BestEffort => repo.mark_sent(&post.id).await?,
                    }
                }
            }
        }

        info!(
            "Run complete: fetched={} inserted={} duplicates={} sent={} failed={}",
            report.fetched, report.inserted, report.duplicates, report.sent, report.failed
        );
        Ok(report)
    }

    /// Repeat [`run_once`](Self::run_once) every `every`.
    ///
    /// A failed run is logged and the loop continues with the next tick.
    pub async fn run_forever(&self, every: Duration) {
        info!("Relay started (interval: {} seconds)", every.as_secs());

        let mut timer = interval(every);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;
            if let Err(e) = self.run_once().await {
                error!("Relay run failed: {}", e);
            }
        }
    }
}
