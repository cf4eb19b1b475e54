use chrono::Utc;
use eventwatch::config::AppConfig;
use eventwatch::event::MONITORED_KINDS;
use eventwatch::monitoring::{
    ChannelSpoolSource, DiscordAlert, EventLogMonitor, EventLogSource, RecordTracker,
};
use eventwatch::utils::logging;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // 1. Load environment variables
    dotenvy::dotenv().ok();

    // 2. Initialize logging
    let _guard = logging::init_logging();

    // 3. Capture the start watermark before touching any source
    let start_time = Utc::now();
    info!(
        start = %start_time.to_rfc3339(),
        monitored_kinds = MONITORED_KINDS.len(),
        "Security event monitor starting"
    );

    let config = AppConfig::from_env().expect("Invalid configuration");

    let alert = DiscordAlert::from_env().unwrap_or_else(|_| {
        warn!("Running with alerts disabled; records are still examined");
        DiscordAlert::disabled()
    });

    let sources: Vec<Box<dyn EventLogSource>> = config
        .channels
        .iter()
        .map(|channel| {
            Box::new(ChannelSpoolSource::new(channel.clone(), &config.spool_dir))
                as Box<dyn EventLogSource>
        })
        .collect();

    let tracker = RecordTracker::new(start_time);
    let mut monitor = EventLogMonitor::new(sources, tracker, alert)
        .with_poll_interval(Duration::from_secs(config.poll_interval_secs));

    // 4. Skip everything already in the channels, then poll forever
    monitor.fast_forward().await;
    info!(channels = ?config.channels, "Now monitoring for new events");
    monitor.run_loop().await;
}
