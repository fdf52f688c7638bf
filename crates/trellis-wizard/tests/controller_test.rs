//! Integration tests for the wizard flow controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use trellis_form::{ErrorMap, FieldValues};
use trellis_wizard::{
  AlertSink, MemoryAlertSink, NextOutcome, SubmitFailure, SubmitResult, WizardController,
  WizardError, WizardPage,
};

/// A three-page wizard: page 0 requires `name`, the rest carry no rules.
fn three_page_wizard() -> Vec<WizardPage> {
  vec![
    WizardPage::new("general", |values: &FieldValues| {
      let mut errors = ErrorMap::new();
      if values.is_blank("name") {
        errors.insert("name", "required");
      }
      errors
    }),
    WizardPage::unvalidated("configuration"),
    WizardPage::unvalidated("summary"),
  ]
}

fn never_submits(_: FieldValues) -> futures::future::Ready<Result<SubmitResult, SubmitFailure>> {
  futures::future::ready(Ok(SubmitResult::empty()))
}

#[tokio::test]
async fn test_next_blocked_on_invalid_page() {
  let controller = WizardController::new(three_page_wizard(), FieldValues::new()).unwrap();
  let cancel = CancellationToken::new();

  let outcome = controller.next(never_submits, &cancel).await.unwrap();
  match outcome {
    NextOutcome::Rejected { errors } => {
      assert_eq!(errors.get("name"), Some("required"));
    }
    other => panic!("expected rejection, got {:?}", other),
  }
  assert_eq!(controller.current_page_index(), 0);
}

#[tokio::test]
async fn test_next_advances_once_valid() {
  let controller = WizardController::new(three_page_wizard(), FieldValues::new()).unwrap();
  let cancel = CancellationToken::new();

  controller.set_field("name", "acme");
  let outcome = controller.next(never_submits, &cancel).await.unwrap();
  assert!(matches!(outcome, NextOutcome::Advanced { page_index: 1 }));
  assert_eq!(controller.current_page_index(), 1);
}

#[tokio::test]
async fn test_terminal_next_runs_submit_with_full_snapshot() {
  let controller = WizardController::new(three_page_wizard(), FieldValues::new()).unwrap();
  let cancel = CancellationToken::new();

  controller.set_field("name", "acme");
  controller.next(never_submits, &cancel).await.unwrap();
  controller.set_field("endpointUri", "https://example.org/authenticate");
  controller.next(never_submits, &cancel).await.unwrap();
  assert_eq!(controller.current_page_index(), 2);

  let calls = Arc::new(AtomicUsize::new(0));
  let seen = Arc::clone(&calls);
  let outcome = controller
    .next(
      move |values| {
        seen.fetch_add(1, Ordering::SeqCst);
        // The snapshot carries fields set across all pages.
        assert_eq!(values.text("name"), Some("acme"));
        assert_eq!(
          values.text("endpointUri"),
          Some("https://example.org/authenticate")
        );
        async { Ok(SubmitResult::created("0d6a8b3f")) }
      },
      &cancel,
    )
    .await
    .unwrap();

  assert_eq!(calls.load(Ordering::SeqCst), 1);
  match outcome {
    NextOutcome::Submitted(result) => {
      assert_eq!(result.created_id.as_deref(), Some("0d6a8b3f"));
    }
    other => panic!("expected submit, got {:?}", other),
  }
  // The submit has resolved; the in-flight flag is back down.
  assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_second_submit_rejected_while_first_in_flight() {
  let controller =
    Arc::new(WizardController::new(three_page_wizard(), FieldValues::new()).unwrap());
  let cancel = CancellationToken::new();
  let calls = Arc::new(AtomicUsize::new(0));

  let gate = Arc::new(tokio::sync::Notify::new());
  let first = {
    let controller = Arc::clone(&controller);
    let cancel = cancel.clone();
    let gate = Arc::clone(&gate);
    let calls = Arc::clone(&calls);
    tokio::spawn(async move {
      controller
        .submit(
          move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
              gate.notified().await;
              Ok(SubmitResult::empty())
            }
          },
          &cancel,
        )
        .await
    })
  };

  // Let the first submit reach its suspension point.
  tokio::time::sleep(Duration::from_millis(20)).await;
  assert!(controller.is_submitting());

  let second = {
    let calls = Arc::clone(&calls);
    controller
      .submit(
        move |_| {
          calls.fetch_add(1, Ordering::SeqCst);
          async { Ok(SubmitResult::empty()) }
        },
        &cancel,
      )
      .await
  };
  assert!(matches!(second, Err(WizardError::ConcurrentSubmit)));

  gate.notify_one();
  let first = first.await.unwrap();
  assert!(first.is_ok());
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_snapshot_taken_before_submit_is_isolated() {
  let controller =
    Arc::new(WizardController::new(three_page_wizard(), FieldValues::new()).unwrap());
  let cancel = CancellationToken::new();
  controller.set_field("name", "acme");

  let gate = Arc::new(tokio::sync::Notify::new());
  let handle = {
    let controller = Arc::clone(&controller);
    let cancel = cancel.clone();
    let gate = Arc::clone(&gate);
    tokio::spawn(async move {
      controller
        .submit(
          move |values| async move {
            gate.notified().await;
            // Late-arriving field updates must not reach this snapshot.
            assert_eq!(values.text("name"), Some("acme"));
            assert!(values.get("lateField").is_none());
            Ok(SubmitResult::empty())
          },
          &cancel,
        )
        .await
    })
  };

  tokio::time::sleep(Duration::from_millis(20)).await;
  controller.set_field("name", "changed");
  controller.set_field("lateField", true);
  gate.notify_one();

  handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cancelled_submit_resolves_as_cancelled() {
  let controller = WizardController::new(three_page_wizard(), FieldValues::new()).unwrap();
  let cancel = CancellationToken::new();

  let pending = controller.submit(
    |_| async {
      tokio::time::sleep(Duration::from_secs(60)).await;
      Ok(SubmitResult::empty())
    },
    &cancel,
  );
  cancel.cancel();

  let result = pending.await;
  assert!(matches!(
    result,
    Err(WizardError::Submit(SubmitFailure::Cancelled))
  ));
  assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_submit_failure_reaches_the_alert_sink() {
  let sink = Arc::new(MemoryAlertSink::with_retention(Duration::from_secs(60)));
  let controller = WizardController::with_alert_sink(
    three_page_wizard(),
    FieldValues::new(),
    Arc::clone(&sink) as Arc<dyn AlertSink>,
  )
  .unwrap();
  let cancel = CancellationToken::new();

  let result = controller
    .submit(
      |_| async {
        Err(SubmitFailure::LimitReached {
          detail: Some("maximum identity provider count reached".to_string()),
        })
      },
      &cancel,
    )
    .await;

  assert!(matches!(
    result,
    Err(WizardError::Submit(SubmitFailure::LimitReached { .. }))
  ));
  let alert = sink.current().expect("failure should raise an alert");
  assert_eq!(alert.message_key, "wizard.submit.limit-reached");
  assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_reopened_wizard_starts_from_initial_values() {
  let mut initial = FieldValues::new();
  initial.set("name", "seeded");

  let controller = WizardController::new(three_page_wizard(), initial.clone()).unwrap();
  controller.set_field("name", "edited");
  controller.set_field("endpointUri", "https://example.org");
  controller.close();

  let reopened = WizardController::new(three_page_wizard(), initial).unwrap();
  assert_eq!(reopened.current_page_index(), 0);
  assert_eq!(reopened.values().text("name"), Some("seeded"));
  assert!(reopened.values().get("endpointUri").is_none());
}
