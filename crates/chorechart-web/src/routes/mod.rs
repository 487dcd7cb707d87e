//! Route handlers.

pub mod chores;
pub mod claims;
pub mod home;

use askama::Template;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::error::AppError;
use crate::views::Notice;

/// Query string carried by post-redirect-get pages.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Form value marking a delete request on the edit forms.
pub(crate) fn wants_delete(field: Option<&str>) -> bool {
    field == Some("1")
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    Ok(Html(template.render()?).into_response())
}

/// 303 redirect that shows `notice` on the target page.
pub(crate) fn see_other(path: &str, notice: Notice) -> Response {
    Redirect::to(&format!("{}?notice={}", path, notice.as_str())).into_response()
}
