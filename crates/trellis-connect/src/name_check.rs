//! Connection name availability checking.
//!
//! The wizard checks whether a typed connection name is already taken
//! while the user is still editing. Calls are driven through a
//! [`trellis_wizard::Debouncer`] so only the value that survives the
//! quiet window triggers a lookup; this type adds the value cache on
//! top, so re-checking an unchanged name never repeats the lookup.

use std::sync::Mutex;

use tracing::debug;

/// Caches the most recent name lookup.
///
/// Lookup failures count the name as available; a real duplicate is
/// still caught by backend validation when the wizard submits.
pub struct NameAvailabilityChecker<F> {
  lookup: F,
  cache: Mutex<Option<(String, bool)>>,
}

impl<F> NameAvailabilityChecker<F> {
  pub fn new(lookup: F) -> Self {
    Self {
      lookup,
      cache: Mutex::new(None),
    }
  }

  /// Whether `name` is already taken by an existing connection.
  pub async fn is_taken<Fut, E>(&self, name: &str) -> bool
  where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
  {
    if let Some((cached_name, taken)) = self.cache.lock().unwrap().as_ref()
      && cached_name == name
    {
      return *taken;
    }

    let taken = match (self.lookup)(name.to_string()).await {
      Ok(taken) => taken,
      Err(_) => {
        debug!(name, "name availability lookup failed; treating as available");
        false
      }
    };

    *self.cache.lock().unwrap() = Some((name.to_string(), taken));
    taken
  }
}
