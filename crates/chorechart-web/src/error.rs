//! HTTP error mapping.
//!
//! Every route reports failures the same way: the matching status code and
//! the error page.

use askama::Template;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chorechart_core::CoreError;
use tracing::{error, warn};

/// Error returned by route handlers.
#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    Render(askama::Error),
    /// A record id in the URL that is not a number.
    Path(PathRejection),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        Self::Path(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        Self::Render(e)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    notice: String,
    status: u16,
    title: String,
    message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::ChoreNotFound(_) | CoreError::ClaimNotFound(_)) | Self::Path(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Core(CoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Core(CoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Core(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Core(CoreError::ChoreNotFound(id)) => format!("There is no chore #{}.", id),
            Self::Core(CoreError::ClaimNotFound(id)) => format!("There is no claim #{}.", id),
            Self::Core(CoreError::Validation(msg)) => msg.clone(),
            Self::Core(CoreError::Conflict(msg)) => msg.clone(),
            Self::Path(_) => "There is no such record.".to_string(),
            Self::Core(_) | Self::Render(_) => "Something went wrong on our side.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Core(e) if e.is_user_error() => warn!(status = status.as_u16(), error = %e, "Request rejected"),
            Self::Core(e) => error!(error = %e, "Request failed"),
            Self::Render(e) => error!(error = %e, "Template rendering failed"),
            Self::Path(e) => warn!(status = status.as_u16(), error = %e, "Request rejected"),
        }

        let page = ErrorTemplate {
            notice: String::new(),
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message(),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, self.message()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::from(CoreError::ChoreNotFound(1)).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(CoreError::ClaimNotFound(1)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(CoreError::validation("bad")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::from(CoreError::conflict("busy")).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(CoreError::Config("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
