//! Submission lifecycle shared by every auth form.
//!
//! ```text
//! Idle --submit--> Loading --(ok)--> Success
//!                          \-(err)-> Error
//! Success/Error --submit--> Loading
//! ```
//!
//! A submission made while `Loading` is rejected only when the form disables
//! its submit control ([`SubmitGuard::DisableWhileLoading`]); otherwise a second
//! provider call is dispatched.

use std::future::Future;
use tokio::sync::watch;
use tracing::{debug, error};

use super::{
    status::FormStatus,
    toast::{Toast, ToastHandle},
};
use crate::auth::AuthError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitGuard {
    DisableWhileLoading,
    None,
}

impl SubmitGuard {
    #[must_use]
    pub const fn disables(self) -> bool {
        matches!(self, Self::DisableWhileLoading)
    }
}

/// Toast texts and button labels for one form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormMessages {
    pub success: &'static str,
    pub error: &'static str,
    pub submit_label: &'static str,
    pub loading_label: &'static str,
}

#[derive(Debug)]
pub enum Submission<T> {
    /// Dropped by the submit guard; no provider call was made.
    Rejected,
    Succeeded(T),
    Failed(AuthError),
}

impl<T> Submission<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

#[derive(Debug)]
pub struct FormController {
    status: watch::Sender<FormStatus>,
    guard: SubmitGuard,
    messages: FormMessages,
    toasts: ToastHandle,
}

impl FormController {
    #[must_use]
    pub fn new(guard: SubmitGuard, messages: FormMessages, toasts: ToastHandle) -> Self {
        let (status, _) = watch::channel(FormStatus::Idle);
        Self {
            status,
            guard,
            messages,
            toasts,
        }
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        *self.status.borrow()
    }

    /// Observe every status transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn guard(&self) -> SubmitGuard {
        self.guard
    }

    #[must_use]
    pub fn messages(&self) -> &FormMessages {
        &self.messages
    }

    /// Whether the submit control renders disabled right now.
    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        self.guard.disables() && self.status().is_loading()
    }

    /// Run one submission. `operation` is polled only after the status is `Loading`.
    ///
    /// Provider failures are logged, turned into an error toast and returned as
    /// [`Submission::Failed`]; they never escape as a panic or `Err`.
    pub async fn submit<T, F>(&self, operation: F) -> Submission<T>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        if !self.begin() {
            debug!("submission ignored while a previous one is loading");
            return Submission::Rejected;
        }

        match operation.await {
            Ok(value) => {
                self.status.send_replace(FormStatus::Success);
                self.toasts.push(Toast::success(self.messages.success));
                Submission::Succeeded(value)
            }
            Err(err) => {
                error!(kind = %err.kind(), "{}: {err}", self.messages.error);
                self.status.send_replace(FormStatus::Error);
                self.toasts
                    .push(Toast::error(self.messages.error, err.message()));
                Submission::Failed(err)
            }
        }
    }

    /// Move to `Loading`; `false` when the guard refuses the submission.
    fn begin(&self) -> bool {
        let guard = self.guard;
        let mut accepted = false;

        self.status.send_if_modified(|status| {
            if guard.disables() && status.is_loading() {
                return false;
            }
            accepted = true;
            let changed = !status.is_loading();
            *status = FormStatus::Loading;
            changed
        });

        accepted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::AuthErrorKind;
    use crate::forms::toast::{ToastKind, Toaster};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    const MESSAGES: FormMessages = FormMessages {
        success: "done",
        error: "failed",
        submit_label: "Go",
        loading_label: "Going",
    };

    fn controller(guard: SubmitGuard) -> (FormController, Toaster) {
        let toaster = Toaster::new();
        (FormController::new(guard, MESSAGES, toaster.handle()), toaster)
    }

    #[tokio::test]
    async fn success_moves_idle_loading_success() {
        let (controller, mut toaster) = controller(SubmitGuard::DisableWhileLoading);
        let mut seen = controller.subscribe();
        assert_eq!(controller.status(), FormStatus::Idle);

        let result = controller
            .submit(async {
                assert_eq!(*seen.borrow_and_update(), FormStatus::Loading);
                Ok::<_, AuthError>(7)
            })
            .await;

        assert!(matches!(result, Submission::Succeeded(7)));
        assert_eq!(controller.status(), FormStatus::Success);
        let toasts = toaster.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "done");
    }

    #[tokio::test]
    async fn failure_ends_in_error_with_toast() {
        let (controller, mut toaster) = controller(SubmitGuard::None);

        let result: Submission<()> = controller
            .submit(async {
                Err::<(), _>(AuthError::new(
                    AuthErrorKind::NetworkFailure,
                    "connection refused",
                ))
            })
            .await;

        assert!(matches!(result, Submission::Failed(ref e) if e.kind() == AuthErrorKind::NetworkFailure));
        assert_eq!(controller.status(), FormStatus::Error);
        let toasts = toaster.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "failed");
        assert_eq!(toasts[0].detail.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn resubmission_after_error_is_allowed() {
        let (controller, mut toaster) = controller(SubmitGuard::DisableWhileLoading);

        let _ = controller
            .submit(async { Err::<(), _>(AuthError::unknown("nope")) })
            .await;
        assert_eq!(controller.status(), FormStatus::Error);

        let result = controller.submit(async { Ok::<_, AuthError>(()) }).await;
        assert!(result.is_success());
        assert_eq!(controller.status(), FormStatus::Success);
        assert_eq!(toaster.drain().len(), 2);
    }

    #[tokio::test]
    async fn guarded_form_rejects_submission_while_loading() {
        let (controller, mut toaster) = controller(SubmitGuard::DisableWhileLoading);
        let controller = Arc::new(controller);
        let (release, wait) = oneshot::channel::<()>();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move {
                controller
                    .submit(async move {
                        wait.await.unwrap();
                        Ok::<_, AuthError>(())
                    })
                    .await
            }
        });

        let mut seen = controller.subscribe();
        seen.wait_for(|status| status.is_loading()).await.unwrap();
        assert!(controller.submit_disabled());

        let second = controller.submit(async { Ok::<_, AuthError>(()) }).await;
        assert!(matches!(second, Submission::Rejected));
        assert_eq!(controller.status(), FormStatus::Loading);

        release.send(()).unwrap();
        assert!(first.await.unwrap().is_success());
        assert_eq!(controller.status(), FormStatus::Success);
        assert_eq!(toaster.drain().len(), 1);
    }

    #[tokio::test]
    async fn unguarded_form_dispatches_while_loading() {
        let (controller, mut toaster) = controller(SubmitGuard::None);
        let controller = Arc::new(controller);
        let (release, wait) = oneshot::channel::<()>();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move {
                controller
                    .submit(async move {
                        wait.await.unwrap();
                        Ok::<_, AuthError>(())
                    })
                    .await
            }
        });

        let mut seen = controller.subscribe();
        seen.wait_for(|status| status.is_loading()).await.unwrap();
        assert!(!controller.submit_disabled());

        let second = controller.submit(async { Ok::<_, AuthError>(()) }).await;
        assert!(second.is_success());

        release.send(()).unwrap();
        assert!(first.await.unwrap().is_success());
        assert_eq!(toaster.drain().len(), 2);
    }
}
