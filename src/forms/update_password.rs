use secrecy::SecretString;

use super::{
    controller::{FormController, FormMessages, Submission, SubmitGuard},
    schema::UpdatePasswordValues,
    toast::ToastHandle,
};
use crate::auth::{AuthError, AuthErrorKind, AuthProvider, Session};

pub const MESSAGES: FormMessages = FormMessages {
    success: "Password updated",
    error: "Could not update password",
    submit_label: "Update Password",
    loading_label: "Updating Password",
};

/// New password for the session opened by a recovery link.
#[derive(Debug)]
pub struct UpdatePasswordForm {
    controller: FormController,
}

impl UpdatePasswordForm {
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
        session: Option<&Session>,
        values: UpdatePasswordValues,
    ) -> Submission<()> {
        let password = SecretString::from(values.password);

        self.controller
            .submit(async {
                let Some(session) = session else {
                    return Err(AuthError::new(
                        AuthErrorKind::CredentialsInvalid,
                        "Auth session missing!",
                    ));
                };
                provider.update_password(session, &password).await
            })
            .await
    }
}
