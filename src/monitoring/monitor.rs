//! Monitor loop over the configured log channels
//!
//! Two phases: a one-time fast-forward past everything already in the
//! channels, then steady-state polling. Each new record flows one way
//! through tracker -> extractor -> notifier; no error terminates the loop.

use crate::event::{monitored_kind, Alert};
use crate::monitoring::extractor::extract_details;
use crate::monitoring::source::EventLogSource;
use crate::monitoring::tracker::RecordTracker;
use crate::monitoring::DiscordAlert;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default sleep between poll passes.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polls the log sources and forwards notify-worthy records as alerts.
pub struct EventLogMonitor {
    /// Sources visited in order on every pass.
    sources: Vec<Box<dyn EventLogSource>>,
    /// Dedup set and start watermark.
    tracker: RecordTracker,
    /// Alert delivery service.
    alert: DiscordAlert,
    /// Sleep between poll passes.
    poll_interval: Duration,
}

impl EventLogMonitor {
    /// Create a monitor over the given sources.
    pub fn new(
        sources: Vec<Box<dyn EventLogSource>>,
        tracker: RecordTracker,
        alert: DiscordAlert,
    ) -> Self {
        Self {
            sources,
            tracker,
            alert,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The dedup tracker (for observability and tests).
    pub fn tracker(&self) -> &RecordTracker {
        &self.tracker
    }

    /// Consume and discard everything already present in each source.
    ///
    /// Run once at startup, after the tracker's start watermark has been
    /// captured. A read error ends the fast-forward for that source only;
    /// the watermark still shields pre-existing records from notification.
    pub async fn fast_forward(&mut self) {
        for source in self.sources.iter_mut() {
            let mut discarded = 0usize;
            loop {
                match source.read_batch().await {
                    Ok(batch) if batch.is_empty() => break,
                    Ok(batch) => discarded += batch.len(),
                    Err(e) => {
                        warn!(
                            channel = source.channel(),
                            error = %e,
                            "Read failed during fast-forward"
                        );
                        break;
                    }
                }
            }
            info!(
                channel = source.channel(),
                discarded, "Fast-forwarded past pre-existing records"
            );
        }
    }

    /// Run one poll pass over all sources.
    ///
    /// Returns the number of alerts delivered. Source-read and delivery
    /// errors are logged and skipped; they never propagate.
    #[instrument(skip(self), level = "debug")]
    pub async fn poll_once(&mut self) -> usize {
        let mut delivered = 0usize;

        for source in self.sources.iter_mut() {
            let batch = match source.read_batch().await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(channel = source.channel(), error = %e, "Failed to read batch");
                    continue;
                }
            };

            let channel = source.channel();
            for record in batch {
                if !self
                    .tracker
                    .is_new(channel, record.record_number, record.time_generated)
                {
                    continue;
                }

                if let Some(kind) = monitored_kind(record.event_id) {
                    let detail = extract_details(record.event_id, &record.string_inserts);
                    if detail.should_notify() {
                        let alert = Alert::new(kind, &record, detail.to_string());
                        match self.alert.send_alert(&alert).await {
                            Ok(()) => delivered += 1,
                            Err(e) => {
                                warn!(
                                    event_id = record.event_id,
                                    record_number = record.record_number,
                                    error = %e,
                                    "Alert dropped after delivery failure"
                                );
                            }
                        }
                    } else {
                        debug!(
                            event_id = record.event_id,
                            record_number = record.record_number,
                            detail = %detail,
                            "Suppressing notification"
                        );
                    }
                } else {
                    debug!(
                        event_id = record.event_id,
                        record_number = record.record_number,
                        "Unmonitored event kind"
                    );
                }

                // Examined, monitored or not: never look at it again.
                self.tracker.mark_processed(channel, record.record_number);
            }
        }

        delivered
    }

    /// Steady-state phase: poll forever, sleeping between passes.
    ///
    /// Has no terminal state; the process is expected to be killed
    /// externally.
    pub async fn run_loop(&mut self) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Entering monitoring loop"
        );

        loop {
            let delivered = self.poll_once().await;
            debug!(delivered, "Poll pass complete");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
