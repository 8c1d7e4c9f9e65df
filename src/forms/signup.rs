use secrecy::SecretString;
use url::Url;

use super::{
    controller::{FormController, FormMessages, Submission, SubmitGuard},
    schema::SignUpValues,
    toast::ToastHandle,
};
use crate::auth::{AuthError, AuthProvider, PkceVerifier, SignUp};

pub const MESSAGES: FormMessages = FormMessages {
    success: "Check your email for the confirmation link",
    error: "Could not Sign Up",
    submit_label: "Sign Up",
    loading_label: "Signing up",
};

/// Account registration. Success means the provider sent a confirmation
/// email; the user is not signed in yet.
#[derive(Debug)]
pub struct SignUpForm {
    controller: FormController,
}

impl SignUpForm {
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

    /// Returns the PKCE verifier the confirmation callback must present.
    pub async fn submit(
        &self,
        provider: &dyn AuthProvider,
        email_redirect_to: Url,
        values: SignUpValues,
    ) -> Submission<PkceVerifier> {
        let request = SignUp {
            email: values.email,
            password: SecretString::from(values.password),
            full_name: values.full_name,
            email_redirect_to,
            code_verifier: PkceVerifier::generate(),
        };

        self.controller
            .submit(async {
                provider.sign_up(&request).await?;
                Ok::<_, AuthError>(request.code_verifier.clone())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::testing::{Call, MockProvider};
    use crate::forms::{FormStatus, ToastKind, Toaster};

    #[tokio::test]
    async fn sign_up_sends_profile_and_callback_url() {
        let provider = MockProvider::new();
        let mut toaster = Toaster::new();
        let form = SignUpForm::new(toaster.handle());
        let callback = Url::parse("https://aied.tools/api/auth/callback").unwrap();

        let result = form
            .submit(
                &provider,
                callback,
                SignUpValues {
                    full_name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    password: "secret123".to_string(),
                },
            )
            .await;

        assert!(result.is_success());
        assert_eq!(form.controller().status(), FormStatus::Success);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let Call::SignUp {
            email,
            password,
            full_name,
            email_redirect_to,
        } = &calls[0]
        else {
            panic!("expected a sign-up call, got {calls:?}");
        };
        assert_eq!(email, "ada@example.com");
        assert_eq!(password, "secret123");
        assert_eq!(full_name, "Ada Lovelace");
        assert!(email_redirect_to.ends_with("/api/auth/callback"));

        let toasts = toaster.drain();
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Check your email for the confirmation link");
    }

    #[tokio::test]
    async fn failed_sign_up_ends_in_error() {
        let provider = MockProvider::failing("User already registered");
        let mut toaster = Toaster::new();
        let form = SignUpForm::new(toaster.handle());
        let callback = Url::parse("https://aied.tools/api/auth/callback").unwrap();

        let result = form
            .submit(
                &provider,
                callback,
                SignUpValues {
                    full_name: String::new(),
                    email: "ada@example.com".to_string(),
                    password: "secret123".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Submission::Failed(_)));
        assert_eq!(form.controller().status(), FormStatus::Error);
        assert_eq!(toaster.drain()[0].message, "Could not Sign Up");
    }
}
