use axum::{
    extract::{Extension, Form},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    forms::{
        forgot_password::ForgotPasswordForm, schema::ForgotPasswordValues, Submission, Toaster,
    },
    web::{
        session::{store_code_verifier, SessionContext},
        state::AppState,
        views::{render_template, ForgotPasswordPage, FormView, Shell},
    },
};

pub async fn page(session: SessionContext) -> Response {
    let form = ForgotPasswordForm::new(Toaster::new().handle());
    render_template(&ForgotPasswordPage {
        shell: Shell::new(&session, Vec::new()),
        form: FormView::from(form.controller()),
        email: String::new(),
    })
}

pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    session: SessionContext,
    Form(values): Form<ForgotPasswordValues>,
) -> Response {
    let mut toaster = Toaster::new();
    let form = ForgotPasswordForm::new(toaster.handle());
    let email = values.email.clone();

    let mut headers = HeaderMap::new();
    let submission = form
        .submit(state.provider(), state.site().update_password_url(), values)
        .await;
    if let Submission::Succeeded(verifier) = submission {
        store_code_verifier(&mut headers, state.site(), &verifier);
    }

    let page = ForgotPasswordPage {
        shell: Shell::new(&session, toaster.drain()),
        form: FormView::from(form.controller()),
        email,
    };

    (headers, render_template(&page)).into_response()
}
