//! Submission controller
//!
//! One state machine shared by every form: `Editing` until a valid submit,
//! `Submitting` while the gateway call is in flight, then settled as
//! `Succeeded` or `Failed`. A second submit while one is in flight is
//! refused, so a double click cannot fire two gateway calls.

use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::error::FormsError;
use crate::form::FieldErrors;
use crate::ports::GatewayResult;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed { reason: String },
}

/// Result of one submit attempt
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome<R> {
    /// Schema rejected the form; nothing was sent
    Invalid(FieldErrors),
    /// A submission was already in flight
    Busy,
    /// The gateway returned a record
    Completed(R),
    /// Payload building or the gateway call failed
    Failed(String),
}

impl<R> SubmitOutcome<R> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Completed(record) => Some(record),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubmissionController {
    state: Arc<Mutex<SubmissionState>>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state.lock().clone()
    }

    /// Loading indicator shown and submit control disabled
    pub fn is_loading(&self) -> bool {
        *self.state.lock() == SubmissionState::Submitting
    }

    /// Back to editing after a settled submission
    pub fn acknowledge(&self) {
        let mut state = self.state.lock();
        if *state != SubmissionState::Submitting {
            *state = SubmissionState::Editing;
        }
    }

    /// Build the payload, call the gateway and settle.
    ///
    /// `operation` names the call in logs.
    pub async fn run<P, R, B, C, Fut>(&self, operation: &str, build: B, call: C) -> SubmitOutcome<R>
    where
        B: FnOnce() -> Result<P, FormsError>,
        C: FnOnce(P) -> Fut,
        Fut: Future<Output = GatewayResult<Option<R>>>,
    {
        let Some(mut guard) = self.begin() else {
            tracing::warn!(operation, "submission already in flight");
            return SubmitOutcome::Busy;
        };

        let payload = match build() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(operation, error = %e, "could not build payload");
                return guard.fail(e.to_string());
            }
        };

        tracing::info!(operation, "submitting");

        match call(payload).await {
            Ok(Some(record)) => {
                tracing::info!(operation, "submission succeeded");
                guard.succeed(record)
            }
            Ok(None) => {
                tracing::error!(operation, "gateway returned no record");
                guard.fail(format!("{} returned no record", operation))
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "submission failed");
                guard.fail(e.to_string())
            }
        }
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let mut state = self.state.lock();
        if *state == SubmissionState::Submitting {
            return None;
        }
        *state = SubmissionState::Submitting;
        Some(InFlight {
            controller: self,
            settled: false,
        })
    }

    fn settle(&self, next: SubmissionState) {
        *self.state.lock() = next;
    }
}

/// Settles the controller; a dropped, unsettled submission returns to editing
struct InFlight<'a> {
    controller: &'a SubmissionController,
    settled: bool,
}

impl InFlight<'_> {
    fn succeed<R>(&mut self, record: R) -> SubmitOutcome<R> {
        self.settled = true;
        self.controller.settle(SubmissionState::Succeeded);
        SubmitOutcome::Completed(record)
    }

    fn fail<R>(&mut self, reason: String) -> SubmitOutcome<R> {
        self.settled = true;
        self.controller.settle(SubmissionState::Failed {
            reason: reason.clone(),
        });
        SubmitOutcome::Failed(reason)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.settle(SubmissionState::Editing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayError;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_success_settles() {
        let controller = SubmissionController::new();
        let outcome = controller
            .run("createUser", || Ok(2), |n: i32| async move { Ok(Some(n * 21)) })
            .await;
        assert_eq!(outcome, SubmitOutcome::Completed(42));
        assert_eq!(controller.state(), SubmissionState::Succeeded);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_falsy_result_fails() {
        let controller = SubmissionController::new();
        let outcome: SubmitOutcome<i32> = controller
            .run("createUser", || Ok(()), |_| async { Ok(None) })
            .await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(matches!(controller.state(), SubmissionState::Failed { .. }));

        controller.acknowledge();
        assert_eq!(controller.state(), SubmissionState::Editing);
    }

    #[tokio::test]
    async fn test_gateway_error_fails() {
        let controller = SubmissionController::new();
        let outcome: SubmitOutcome<i32> = controller
            .run("registerPatient", || Ok(()), |_| async {
                Err(GatewayError::Connection("refused".into()))
            })
            .await;
        assert_eq!(outcome, SubmitOutcome::Failed("connection error: refused".into()));
    }

    #[tokio::test]
    async fn test_payload_error_skips_call() {
        let controller = SubmissionController::new();
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let outcome: SubmitOutcome<i32> = controller
            .run(
                "createAppointment",
                || Err::<(), _>(FormsError::MissingContext("patient id".into())),
                |_| {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    async { Ok(Some(1)) }
                },
            )
            .await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(matches!(controller.state(), SubmissionState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_busy() {
        let controller = SubmissionController::new();
        let (tx, rx) = oneshot::channel::<()>();

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move {
                controller
                    .run("createUser", || Ok(()), |_| async move {
                        rx.await.ok();
                        Ok(Some(1))
                    })
                    .await
            })
        };

        while !controller.is_loading() {
            tokio::task::yield_now().await;
        }

        let second: SubmitOutcome<i32> = controller
            .run("createUser", || Ok(()), |_| async { Ok(Some(2)) })
            .await;
        assert_eq!(second, SubmitOutcome::Busy);

        tx.send(()).unwrap();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Completed(1));
        assert_eq!(controller.state(), SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_dropped_submission_returns_to_editing() {
        let controller = SubmissionController::new();
        {
            let fut = controller.run("createUser", || Ok(()), |_| async {
                std::future::pending::<GatewayResult<Option<i32>>>().await
            });
            tokio::pin!(fut);
            let polled = tokio::time::timeout(std::time::Duration::from_millis(10), &mut fut).await;
            assert!(polled.is_err());
            assert!(controller.is_loading());
        }
        assert_eq!(controller.state(), SubmissionState::Editing);
    }
}
