use super::{
    controller::{FormController, FormMessages, Submission, SubmitGuard},
    schema::SignInValues,
    toast::ToastHandle,
};
use crate::auth::{AuthProvider, Credentials, Session};

pub const MESSAGES: FormMessages = FormMessages {
    success: "Signed In! Redirecting to your dashboard",
    error: "Could not Sign In",
    submit_label: "Sign In",
    loading_label: "Signing In",
};

/// Email + password sign-in. Navigation after success is left to the session
/// cookies the caller stores; the form itself never redirects.
#[derive(Debug)]
pub struct SignInForm {
    controller: FormController,
}

impl SignInForm {
    #[must_use]
    pub fn new(toasts: ToastHandle) -> Self {
        Self {
            controller: FormController::new(SubmitGuard::DisableWhileLoading, MESSAGES, toasts),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub async fn submit(
        &self,
        provider: &dyn AuthProvider,
        values: SignInValues,
    ) -> Submission<Session> {
        let credentials = Credentials::from(values);
        self.controller.submit(provider.sign_in(&credentials)).await
    }
}
