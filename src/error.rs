use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("Already checked in today")]
    AlreadyCheckedInToday,

    #[error("Storage conflict: {0}")]
    StorageConflict(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::InvalidTransactionType(msg) => {
                log::warn!("Invalid transaction type: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INVALID_TRANSACTION_TYPE",
                    msg.clone(),
                )
            }
            // Same-day repeat check-in is a normal outcome, not a fault
            AppError::AlreadyCheckedInToday => (
                actix_web::http::StatusCode::CONFLICT,
                "ALREADY_CHECKED_IN",
                "Already checked in today".to_string(),
            ),
            AppError::StorageConflict(msg) => {
                log::warn!("Storage conflict: {msg}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "STORAGE_CONFLICT",
                    "Concurrent update lost, please retry".to_string(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_rejections_map_to_bad_request() {
        let err = AppError::InvalidTransactionType("bonus".into());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        let err = AppError::ValidationError("zero points".into());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_same_day_check_in_maps_to_conflict() {
        let err = AppError::AlreadyCheckedInToday;
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_lost_race_maps_to_conflict() {
        let err = AppError::StorageConflict("aggregate update affected 0 rows".into());
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_failures_stay_internal() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("connection reset".into()));
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
