//! Auth forms: field schemas, the submission lifecycle and toasts.

mod controller;
pub mod forgot_password;
pub mod schema;
pub mod signin;
pub mod signup;
mod status;
mod toast;
pub mod update_password;

pub use self::controller::{FormController, FormMessages, Submission, SubmitGuard};
pub use self::forgot_password::ForgotPasswordForm;
pub use self::signin::SignInForm;
pub use self::signup::SignUpForm;
pub use self::status::FormStatus;
pub use self::toast::{Toast, ToastHandle, ToastKind, ToastPosition, Toaster};
pub use self::update_password::UpdatePasswordForm;
