//! Latest-request-wins debouncing.
//!
//! Used for the expensive checks a wizard runs while the user is still
//! typing, e.g. the connection-name availability lookup. Each call
//! supersedes any not-yet-delivered value; the handler only ever runs
//! for the value that survived the quiet window.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Debounces delivery of values to an async handler.
pub struct Debouncer<T> {
  window: Duration,
  handler: Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>,
  pending: Mutex<Option<CancellationToken>>,
}

impl<T: Send + 'static> Debouncer<T> {
  pub fn new<F, Fut>(window: Duration, handler: F) -> Self
  where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    Self {
      window,
      handler: Arc::new(move |value| Box::pin(handler(value))),
      pending: Mutex::new(None),
    }
  }

  /// Schedule delivery of `value` after the quiet window.
  ///
  /// A call made before an earlier value was delivered cancels that
  /// value; only the latest one reaches the handler.
  pub fn call(&self, value: T) {
    let token = CancellationToken::new();
    if let Some(previous) = self.pending.lock().unwrap().replace(token.clone()) {
      previous.cancel();
    }

    let handler = Arc::clone(&self.handler);
    let window = self.window;
    tokio::spawn(async move {
      tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(window) => {
          handler(value).await;
        }
      }
    });
  }

  /// Drop any scheduled-but-undelivered value.
  pub fn cancel(&self) {
    if let Some(previous) = self.pending.lock().unwrap().take() {
      previous.cancel();
    }
  }
}
