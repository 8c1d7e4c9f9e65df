use axum::{
    extract::{Extension, Form},
    response::Response,
};
use std::sync::Arc;

use crate::{
    forms::{schema::UpdatePasswordValues, update_password::UpdatePasswordForm, Toaster},
    web::{
        session::SessionContext,
        state::AppState,
        views::{render_template, FormView, Shell, UpdatePasswordPage},
    },
};

pub async fn page(session: SessionContext) -> Response {
    let form = UpdatePasswordForm::new(Toaster::new().handle());
    render_template(&UpdatePasswordPage {
        shell: Shell::new(&session, Vec::new()),
        form: FormView::from(form.controller()),
    })
}

pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    session: SessionContext,
    Form(values): Form<UpdatePasswordValues>,
) -> Response {
    let mut toaster = Toaster::new();
    let form = UpdatePasswordForm::new(toaster.handle());

    form.submit(state.provider(), session.session(), values).await;

    render_template(&UpdatePasswordPage {
        shell: Shell::new(&session, toaster.drain()),
        form: FormView::from(form.controller()),
    })
}
