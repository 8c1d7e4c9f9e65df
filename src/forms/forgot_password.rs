use url::Url;

use super::{
    controller::{FormController, FormMessages, Submission, SubmitGuard},
    schema::ForgotPasswordValues,
    toast::ToastHandle,
};
use crate::auth::{AuthError, AuthProvider, PasswordReset, PkceVerifier};

pub const MESSAGES: FormMessages = FormMessages {
    success: "Password reset instructions sent to your email",
    error: "Could not reset password",
    submit_label: "Send Instructions",
    loading_label: "Sending Instructions",
};

/// Password recovery request.
///
/// Unlike the other forms the submit control stays enabled while loading, so
/// a second submission dispatches another provider call.
#[derive(Debug)]
pub struct ForgotPasswordForm {
    controller: FormController,
}

impl ForgotPasswordForm {
    #[must_use]
    pub fn new(toasts: ToastHandle) -> Self {
        Self {
            controller: FormController::new(SubmitGuard::None, MESSAGES, toasts),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Returns the PKCE verifier the update-password callback must present.
    pub async fn submit(
        &self,
        provider: &dyn AuthProvider,
        redirect_to: Url,
        values: ForgotPasswordValues,
    ) -> Submission<PkceVerifier> {
        let request = PasswordReset {
            email: values.email,
            redirect_to,
            code_verifier: PkceVerifier::generate(),
        };

        self.controller
            .submit(async {
                provider.reset_password(&request).await?;
                Ok::<_, AuthError>(request.code_verifier.clone())
            })
            .await
    }
}
