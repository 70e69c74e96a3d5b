use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::{api::ApiError, res};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(ApiError::RoomNotFound(uri)) = self.0.downcast_ref::<ApiError>() {
            return res::sorry(StatusCode::NOT_FOUND, &format!("room {uri}"));
        }

        tracing::error!(error = %self.0, "request failed");
        tracing::debug!("{}", self.0.backtrace());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("something broke: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
