use axum::{
    extract::{Extension, Form},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    forms::{schema::SignInValues, signin::SignInForm, Submission, Toaster},
    web::{
        session::{store_session, SessionContext},
        state::AppState,
        views::{render_template, FormView, Shell, SignInPage},
    },
};

const DASHBOARD_PATH: &str = "/dashboard";

pub async fn page(session: SessionContext) -> Response {
    let form = SignInForm::new(Toaster::new().handle());
    render_template(&SignInPage {
        shell: Shell::new(&session, Vec::new()),
        form: FormView::from(form.controller()),
        email: String::new(),
    })
}

pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    session: SessionContext,
    Form(values): Form<SignInValues>,
) -> Response {
    let mut toaster = Toaster::new();
    let form = SignInForm::new(toaster.handle());
    let email = values.email.clone();

    let mut headers = HeaderMap::new();
    let session = match form.submit(state.provider(), values).await {
        Submission::Succeeded(new_session) => {
            store_session(&mut headers, state.site(), &new_session);
            SessionContext::new(Some(new_session))
        }
        Submission::Rejected | Submission::Failed(_) => session,
    };

    let page = SignInPage {
        shell: Shell::new(&session, toaster.drain()).continue_to(DASHBOARD_PATH),
        form: FormView::from(form.controller()),
        email,
    };

    (headers, render_template(&page)).into_response()
}
