use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Every client-side failure is reported as 400; only unexpected database
/// failures escape as 500.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidReference(msg) | ServiceError::Conflict(msg) => {
                HttpError::BadRequest(msg)
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::BadRequest("Not found".into()),
                RepositoryError::AlreadyExists(constraint) => {
                    HttpError::BadRequest(format!("Duplicate entry violates {constraint}"))
                }
                RepositoryError::ForeignKey(constraint) => {
                    HttpError::BadRequest(format!("Foreign key violation: {constraint}"))
                }
                RepositoryError::Sqlx(err) => {
                    error!("💥 Unhandled database error: {err:?}");
                    HttpError::Internal("Database error".into())
                }
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let cases = vec![
            ServiceError::InvalidReference("Invalid user id".into()),
            ServiceError::Conflict("A user with this email already exists".into()),
            ServiceError::Repo(RepositoryError::AlreadyExists("uq_order_product".into())),
            ServiceError::Repo(RepositoryError::ForeignKey("orders_user_id_fkey".into())),
        ];

        for case in cases {
            let response = HttpError::from(case).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn raw_database_errors_map_to_internal() {
        let err = ServiceError::Repo(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_reference_keeps_message() {
        match HttpError::from(ServiceError::InvalidReference("Invalid order id".into())) {
            HttpError::BadRequest(msg) => assert_eq!(msg, "Invalid order id"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
