use axum::response::Response;

use crate::web::{
    session::SessionContext,
    views::{render_template, DashboardPage},
};

pub async fn dashboard(session: SessionContext) -> Response {
    render_template(&DashboardPage::new(&session))
}
