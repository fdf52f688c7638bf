//! Alert reporting for submit outcomes.
//!
//! The controller never renders messages itself; it reports structured
//! alerts through an [`AlertSink`] and the rendering layer resolves the
//! message keys. Implementations decide what to do with alerts
//! (broadcast, store, log, ignore).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::submit::SubmitFailure;

/// Default retention for transient alerts, matching the console's
/// wizard error clear timeout.
pub const DEFAULT_ALERT_RETENTION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
  Success,
  Error,
}

/// A structural alert. `message_key` identifies the message for the
/// i18n layer; `detail` carries backend-supplied text verbatim when a
/// response included one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
  pub level: AlertLevel,
  pub message_key: String,
  pub detail: Option<String>,
}

impl Alert {
  pub fn success(message_key: impl Into<String>) -> Self {
    Self {
      level: AlertLevel::Success,
      message_key: message_key.into(),
      detail: None,
    }
  }

  pub fn error(message_key: impl Into<String>) -> Self {
    Self {
      level: AlertLevel::Error,
      message_key: message_key.into(),
      detail: None,
    }
  }

  /// The alert for a classified submit failure.
  pub fn from_failure(failure: &SubmitFailure) -> Self {
    Self {
      level: AlertLevel::Error,
      message_key: format!("wizard.submit.{}", failure.kind()),
      detail: failure.detail().map(str::to_string),
    }
  }
}

/// Trait for receiving alerts.
///
/// The controller calls `report` for each alert — implementations decide
/// what to do with them.
pub trait AlertSink: Send + Sync {
  fn report(&self, alert: Alert);
}

/// A no-op sink that discards all alerts.
///
/// Useful for tests or headless drivers that inspect errors directly.
#[derive(Debug, Clone, Default)]
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
  fn report(&self, _alert: Alert) {
    // Intentionally empty
  }
}

/// A sink that forwards alerts to an unbounded channel.
///
/// Use this to consume alerts asynchronously, e.g. to push them into a
/// UI notification stream.
#[derive(Debug, Clone)]
pub struct ChannelAlertSink {
  sender: mpsc::UnboundedSender<Alert>,
}

impl ChannelAlertSink {
  pub fn new(sender: mpsc::UnboundedSender<Alert>) -> Self {
    Self { sender }
  }
}

impl AlertSink for ChannelAlertSink {
  fn report(&self, alert: Alert) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(alert);
  }
}

/// A sink that holds the most recent alert and clears it after a
/// retention period.
///
/// Alerts are transient and dismissible, never modal-blocking: a new
/// alert replaces the current one immediately, and each alert expires
/// on its own timer. A stale timer never clears a newer alert.
#[derive(Clone)]
pub struct MemoryAlertSink {
  current: Arc<Mutex<Option<Alert>>>,
  generation: Arc<AtomicU64>,
  retention: Duration,
}

impl MemoryAlertSink {
  pub fn new() -> Self {
    Self::with_retention(DEFAULT_ALERT_RETENTION)
  }

  pub fn with_retention(retention: Duration) -> Self {
    Self {
      current: Arc::new(Mutex::new(None)),
      generation: Arc::new(AtomicU64::new(0)),
      retention,
    }
  }

  /// The currently displayed alert, if it has not expired.
  pub fn current(&self) -> Option<Alert> {
    self.current.lock().unwrap().clone()
  }

  /// Dismiss the current alert immediately.
  pub fn dismiss(&self) {
    self.generation.fetch_add(1, Ordering::SeqCst);
    self.current.lock().unwrap().take();
  }
}

impl Default for MemoryAlertSink {
  fn default() -> Self {
    Self::new()
  }
}

impl AlertSink for MemoryAlertSink {
  fn report(&self, alert: Alert) {
    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    *self.current.lock().unwrap() = Some(alert);

    let current = Arc::clone(&self.current);
    let generations = Arc::clone(&self.generation);
    let retention = self.retention;
    tokio::spawn(async move {
      tokio::time::sleep(retention).await;
      if generations.load(Ordering::SeqCst) == generation {
        current.lock().unwrap().take();
      }
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_failure_alert_carries_kind_and_detail() {
    let alert = Alert::from_failure(&SubmitFailure::LimitReached {
      detail: Some("maximum identity provider count reached".to_string()),
    });

    assert_eq!(alert.level, AlertLevel::Error);
    assert_eq!(alert.message_key, "wizard.submit.limit-reached");
    assert_eq!(
      alert.detail.as_deref(),
      Some("maximum identity provider count reached")
    );
  }

  #[tokio::test]
  async fn test_memory_sink_clears_after_retention() {
    let sink = MemoryAlertSink::with_retention(Duration::from_millis(20));
    sink.report(Alert::error("wizard.submit.generic"));
    assert!(sink.current().is_some());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(sink.current().is_none());
  }

  #[tokio::test]
  async fn test_newer_alert_survives_stale_timer() {
    let sink = MemoryAlertSink::with_retention(Duration::from_millis(40));
    sink.report(Alert::error("wizard.submit.generic"));

    tokio::time::sleep(Duration::from_millis(25)).await;
    sink.report(Alert::error("wizard.submit.limit-reached"));

    // The first alert's timer fires here; the second must survive it.
    tokio::time::sleep(Duration::from_millis(25)).await;
    let current = sink.current().expect("newer alert should still be shown");
    assert_eq!(current.message_key, "wizard.submit.limit-reached");
  }

  #[tokio::test]
  async fn test_dismiss_clears_immediately() {
    let sink = MemoryAlertSink::new();
    sink.report(Alert::error("wizard.submit.unauthorized"));
    sink.dismiss();
    assert!(sink.current().is_none());
  }

  #[tokio::test]
  async fn test_channel_sink_forwards_alerts() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = ChannelAlertSink::new(tx);
    sink.report(Alert::success("wizard.submit.success"));

    let received = rx.recv().await.unwrap();
    assert_eq!(received.message_key, "wizard.submit.success");
  }
}
