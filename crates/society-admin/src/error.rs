use crate::admissions::{InterviewServiceError, RosterImportError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Roster(RosterImportError),
    Interview(InterviewServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Roster(err) => write!(f, "roster import error: {}", err),
            AppError::Interview(err) => write!(f, "interview error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Interview(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Roster(_) => StatusCode::BAD_REQUEST,
            AppError::Interview(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Interview(InterviewServiceError::Calendar(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Interview(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}

impl From<InterviewServiceError> for AppError {
    fn from(value: InterviewServiceError) -> Self {
        Self::Interview(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::{CalendarError, InterviewId, RepositoryError};

    #[test]
    fn roster_errors_are_client_errors() {
        let err = AppError::from(RosterImportError::InvalidTime {
            line: 3,
            column: "Interview Time",
            value: "tomorrow".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn listener_failures_are_io_errors() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "io error: address in use");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn interview_errors_keep_their_status() {
        let missing = AppError::from(InterviewServiceError::Persistence(
            RepositoryError::NotFound,
        ));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let unscheduled = AppError::from(InterviewServiceError::Calendar(
            CalendarError::MissingTime {
                interview_id: InterviewId(4),
            },
        ));
        assert!(unscheduled.to_string().starts_with("interview error: "));
        assert_eq!(
            unscheduled.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
