//! Page templates and the view models they render.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use super::session::SessionContext;
use crate::forms::{FormController, Toast};

/// Render `template`, answering 500 if it fails.
pub fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("Failed to render template: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug)]
pub struct ToastView {
    pub kind: &'static str,
    pub position: &'static str,
    pub message: String,
    pub detail: String,
}

impl From<Toast> for ToastView {
    fn from(toast: Toast) -> Self {
        Self {
            kind: toast.kind.as_str(),
            position: toast.position.as_str(),
            message: toast.message,
            detail: toast.detail.unwrap_or_default(),
        }
    }
}

/// What the layout needs on every page: the session and the toaster.
#[derive(Debug)]
pub struct Shell {
    pub authenticated: bool,
    pub toasts: Vec<ToastView>,
    /// Page the browser moves on to once the toasts had a moment to show.
    pub next: Option<&'static str>,
}

impl Shell {
    #[must_use]
    pub fn new(session: &SessionContext, toasts: Vec<Toast>) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            toasts: toasts.into_iter().map(ToastView::from).collect(),
            next: None,
        }
    }

    /// Send a freshly signed-in visitor on to `path`; ignored while signed out.
    #[must_use]
    pub fn continue_to(mut self, path: &'static str) -> Self {
        if self.authenticated {
            self.next = Some(path);
        }
        self
    }
}

/// Submit button state derived from a form controller.
#[derive(Debug)]
pub struct FormView {
    pub status: &'static str,
    pub loading: bool,
    pub disabled: bool,
    pub disable_while_loading: bool,
    pub submit_label: &'static str,
    pub loading_label: &'static str,
}

impl From<&FormController> for FormView {
    fn from(controller: &FormController) -> Self {
        let status = controller.status();
        Self {
            status: status.as_str(),
            loading: status.is_loading(),
            disabled: controller.submit_disabled(),
            disable_while_loading: controller.guard().disables(),
            submit_label: controller.messages().submit_label,
            loading_label: controller.messages().loading_label,
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub shell: Shell,
}

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SignInPage {
    pub shell: Shell,
    pub form: FormView,
    pub email: String,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpPage {
    pub shell: Shell,
    pub form: FormView,
    pub full_name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "forgot_password.html")]
pub struct ForgotPasswordPage {
    pub shell: Shell,
    pub form: FormView,
    pub email: String,
}

#[derive(Template)]
#[template(path = "update_password.html")]
pub struct UpdatePasswordPage {
    pub shell: Shell,
    pub form: FormView,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub shell: Shell,
    pub user_name: String,
    pub user_email: String,
}

impl DashboardPage {
    #[must_use]
    pub fn new(session: &SessionContext) -> Self {
        let (user_name, user_email) = session.user().map_or_else(
            || (String::new(), String::new()),
            |user| (user.display_name(), user.email.clone().unwrap_or_default()),
        );
        Self {
            shell: Shell::new(session, Vec::new()),
            user_name,
            user_email,
        }
    }
}
