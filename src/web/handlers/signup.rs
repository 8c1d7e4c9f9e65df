use axum::{
    extract::{Extension, Form},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    forms::{schema::SignUpValues, signup::SignUpForm, Submission, Toaster},
    web::{
        session::{store_code_verifier, SessionContext},
        state::AppState,
        views::{render_template, FormView, Shell, SignUpPage},
    },
};

pub async fn page(session: SessionContext) -> Response {
    let form = SignUpForm::new(Toaster::new().handle());
    render_template(&SignUpPage {
        shell: Shell::new(&session, Vec::new()),
        form: FormView::from(form.controller()),
        full_name: String::new(),
        email: String::new(),
    })
}

pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    session: SessionContext,
    Form(values): Form<SignUpValues>,
) -> Response {
    let mut toaster = Toaster::new();
    let form = SignUpForm::new(toaster.handle());
    let full_name = values.full_name.clone();
    let email = values.email.clone();

    let mut headers = HeaderMap::new();
    let submission = form
        .submit(state.provider(), state.site().callback_url(), values)
        .await;
    if let Submission::Succeeded(verifier) = submission {
        store_code_verifier(&mut headers, state.site(), &verifier);
    }

    let page = SignUpPage {
        shell: Shell::new(&session, toaster.drain()),
        form: FormView::from(form.controller()),
        full_name,
        email,
    };

    (headers, render_template(&page)).into_response()
}
