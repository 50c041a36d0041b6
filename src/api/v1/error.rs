use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::logger::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(code) = err.find::<ApiErrorCode>() {
        (code.clone(), code.to_string())
    } else if err.is_not_found() {
        (ApiErrorCode::NotFound, ApiErrorCode::NotFound.to_string())
    } else {
        (
            ApiErrorCode::InternalError,
            format!("Unhandled error: {:?}", err),
        )
    };
    let status = code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum ApiErrorCode {
    #[error("User identifier is not valid UTF-8 once decoded")]
    InvalidUser,
    #[error("No directory entry for this user")]
    UnknownUser,
    #[error("Several directory entries match this user")]
    AmbiguousUser,
    #[error("Directory entry lacks name, uid or mail")]
    IncompleteUser,
    #[error("User failed to resolve earlier")]
    CachedFailure,
    #[error("Directory unavailable")]
    DirectoryUnavailable,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::UnknownUser | ApiErrorCode::CachedFailure | ApiErrorCode::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiErrorCode::InvalidUser => StatusCode::BAD_REQUEST,
            ApiErrorCode::AmbiguousUser => StatusCode::CONFLICT,
            ApiErrorCode::IncompleteUser => StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorCode::DirectoryUnavailable => StatusCode::BAD_GATEWAY,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<ResolveError> for ApiErrorCode {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::MissingUser => ApiErrorCode::UnknownUser,
            ResolveError::TooManyUsers => ApiErrorCode::AmbiguousUser,
            ResolveError::MissingDetails => ApiErrorCode::IncompleteUser,
            ResolveError::CachedFailure => ApiErrorCode::CachedFailure,
            ResolveError::Transport(e) => {
                warn!("Directory error: {}", e);
                ApiErrorCode::DirectoryUnavailable
            }
        }
    }
}
