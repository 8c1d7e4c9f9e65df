use axum::response::{IntoResponse, Redirect, Response};

use crate::web::{
    session::SessionContext,
    views::{render_template, HomePage, Shell},
};

/// Signed-in visitors go straight to the dashboard; everyone else gets the
/// marketing view.
pub async fn home(session: SessionContext) -> Response {
    if session.is_authenticated() {
        return Redirect::temporary("/dashboard").into_response();
    }

    render_template(&HomePage {
        shell: Shell::new(&session, Vec::new()),
    })
}
