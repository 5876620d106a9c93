use actix_web::{
    body::BoxBody,
    error::BlockingError,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use diesel::result::Error as DBError;
use serde::{Deserialize, Serialize};
use std::convert::From;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Display, PartialEq)]
pub enum TodoApiError {
    /// Malformed input, answered with 400
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{} not found", _0)]
    NotFound(String),

    /// Database or pool failure, answered with 500
    #[display(fmt = "{}", _0)]
    Storage(String),
}

impl TodoApiError {
    pub fn todo_not_found() -> Self {
        TodoApiError::NotFound(String::from("Todo"))
    }

    pub fn invalid_id() -> Self {
        TodoApiError::Validation(String::from("Invalid ID format"))
    }
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::Validation(_) => http::StatusCode::BAD_REQUEST,
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            TodoApiError::Storage(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let body = ErrorResponse {
            error: self.to_string(),
        };

        res.set_body(BoxBody::new(
            serde_json::to_string(&body).unwrap_or_default(),
        ))
    }
}

impl From<r2d2::Error> for TodoApiError {
    fn from(error: r2d2::Error) -> Self {
        log::error!("Database connection error: {}", error);
        TodoApiError::Storage(error.to_string())
    }
}

impl From<DBError> for TodoApiError {
    fn from(error: DBError) -> Self {
        match error {
            DBError::NotFound => TodoApiError::todo_not_found(),
            _ => {
                log::error!("Database error: {}", error);
                TodoApiError::Storage(error.to_string())
            }
        }
    }
}

impl From<BlockingError> for TodoApiError {
    fn from(error: BlockingError) -> Self {
        log::error!("Blocking task failed: {}", error);
        TodoApiError::Storage(error.to_string())
    }
}
