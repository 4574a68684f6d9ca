use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::info;

use heroreel_core::carousel::{CarouselEvent, CarouselService};
use heroreel_core::AppConfig;

/// One printed line of `watch` output
#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    event: &'static str,
    elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

impl<'a> EventRecord<'a> {
    fn new(event: &CarouselEvent, config: &'a AppConfig, start: Instant) -> Self {
        let mut record = Self {
            event: "",
            elapsed_ms: start.elapsed().as_millis() as u64,
            from: None,
            to: None,
            origin: None,
            title: None,
        };

        match event {
            CarouselEvent::SlideChanged(transition) => {
                record.event = "slide_changed";
                record.elapsed_ms = transition.at.saturating_duration_since(start).as_millis() as u64;
                record.from = Some(transition.from);
                record.to = Some(transition.to);
                record.origin = Some(transition.origin.as_str());
                record.title = config.slides.get(transition.to).map(|s| s.title.as_str());
            }
            CarouselEvent::Paused => record.event = "paused",
            CarouselEvent::Resumed => record.event = "resumed",
            CarouselEvent::Disposed => record.event = "disposed",
        }
        record
    }

    fn to_text(&self) -> String {
        let secs = self.elapsed_ms as f64 / 1000.0;
        match (self.from, self.to, self.origin) {
            (Some(from), Some(to), Some(origin)) => format!(
                "{:>8.3}s  {} -> {}  ({})  {}",
                secs,
                from + 1,
                to + 1,
                origin,
                self.title.unwrap_or("")
            ),
            _ => format!("{:>8.3}s  {}", secs, self.event),
        }
    }
}

/// Drive the carousel on real time and print each event until stopped
pub async fn run(config: Arc<AppConfig>, seconds: Option<u64>, json: bool) -> Result<()> {
    if config.slides.is_empty() {
        println!("No slides configured, nothing to watch.");
        return Ok(());
    }

    let start = Instant::now();
    let options = config.carousel.options(config.slides.len());
    let (service, handle) = CarouselService::new(options);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let service = service.with_event_sender(event_tx);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Setup signal handler for graceful shutdown
    let ctrl_c_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = ctrl_c_tx.send(true);
    });

    if let Some(seconds) = seconds {
        let timeout_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            info!("Watch time elapsed after {}s", seconds);
            let _ = timeout_tx.send(true);
        });
    }

    if !config.carousel.autoplay {
        handle.pause();
    }

    let task = tokio::spawn(service.run(shutdown_rx));

    // The service drops its sender after the final Disposed event
    while let Some(event) = event_rx.recv().await {
        let record = EventRecord::new(&event, &config, start);
        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", record.to_text());
        }
    }

    task.await?;
    drop(handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heroreel_core::carousel::{Origin, Transition};

    #[test]
    fn test_slide_change_record() {
        let config = AppConfig::default();
        let start = Instant::now();
        let event = CarouselEvent::SlideChanged(Transition {
            from: 0,
            to: 1,
            origin: Origin::Autoplay,
            at: start + Duration::from_millis(5000),
        });

        let record = EventRecord::new(&event, &config, start);
        assert_eq!(record.elapsed_ms, 5000);
        assert_eq!(record.title, Some(config.slides[1].title.as_str()));

        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(json["event"], "slide_changed");
        assert_eq!(json["to"], 1);
        assert_eq!(json["origin"], "autoplay");

        assert!(record.to_text().contains("1 -> 2  (autoplay)"));
    }

    #[test]
    fn test_plain_event_record_omits_slide_fields() {
        let config = AppConfig::default();
        let record = EventRecord::new(&CarouselEvent::Paused, &config, Instant::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"event\":\"paused\""));
        assert!(!json.contains("from"));
        assert!(record.to_text().ends_with("paused"));
    }
}
