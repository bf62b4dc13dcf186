use failure::Fail;
use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

#[derive(Debug, Fail, PartialEq)]
pub enum ApiError {
    #[fail(display = "{}", _0)]
    Validation(String),
    #[fail(display = "Vehicle not found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn validation(msg: &str) -> Self {
        ApiError::Validation(msg.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        error_reply(self.status(), &self.to_string())
    }
}

/// `{"error": message}` with the given status.
pub fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}
