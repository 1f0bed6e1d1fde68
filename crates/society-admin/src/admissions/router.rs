use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use chrono::{Local, Utc};
use serde_json::json;
use tracing::error;

use super::changes::{InterviewUpdateRequest, ValidationError};
use super::domain::InterviewId;
use super::repository::AdmissionsRepository;
use super::service::{InterviewService, InterviewServiceError};

const CALENDAR_SUFFIX: &str = ".ics";

/// Router builder exposing the interview update and calendar endpoints.
pub fn interview_router<R>(service: Arc<InterviewService<R>>) -> Router
where
    R: AdmissionsRepository + 'static,
{
    Router::new()
        .route(
            "/admissions_admin/interviews/:interview",
            get(calendar_handler::<R>).patch(update_handler::<R>),
        )
        .with_state(service)
}

/// Update payload from either a JSON body or a url-encoded form. Bodies that do not parse are
/// carried as a validation failure so they take the same error path as bad field values.
#[derive(Debug)]
pub struct UpdatePayload(pub Result<InterviewUpdateRequest, ValidationError>);

#[async_trait]
impl<S> FromRequest<S> for UpdatePayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with(mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()))
            .unwrap_or(false);

        let parsed = if is_form {
            Form::<InterviewUpdateRequest>::from_request(req, state)
                .await
                .map(|Form(request)| request)
                .map_err(|rejection| ValidationError::MalformedBody {
                    reason: rejection.body_text(),
                })
        } else {
            match Json::<serde_json::Value>::from_request(req, state).await {
                Ok(Json(body)) => InterviewUpdateRequest::from_json(body),
                Err(rejection) => Err(ValidationError::MalformedBody {
                    reason: rejection.body_text(),
                }),
            }
        };
        Ok(Self(parsed))
    }
}

pub(crate) fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false)
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())],
        body,
    )
        .into_response()
}

fn not_found(raw_id: &str) -> Response {
    plain_text(
        StatusCode::NOT_FOUND,
        format!("interview {raw_id} not found"),
    )
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    UpdatePayload(payload): UpdatePayload,
) -> Response
where
    R: AdmissionsRepository + 'static,
{
    let Ok(id) = raw_id.parse::<u64>().map(InterviewId) else {
        return not_found(&raw_id);
    };
    let xhr = is_xhr(&headers);

    let outcome = payload
        .map_err(InterviewServiceError::from)
        .and_then(|request| service.update(id, request, Local::now().naive_local()));

    match outcome {
        Ok(update) if xhr => {
            let payload = json!({
                "status": update.assignment_status.label(),
                "warning": update.warning,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(update) => {
            let target = match &update.warning {
                Some(warning) => with_query(&update.job_path, "notice", warning),
                None => update.job_path,
            };
            Redirect::to(&target).into_response()
        }
        Err(err) if err.is_not_found() => not_found(&raw_id),
        Err(err) => {
            let message = err.user_message(service.locale());
            if !matches!(
                err,
                InterviewServiceError::DeadlinePassed(_) | InterviewServiceError::Validation(_)
            ) {
                error!(interview = %id, error = %err, "interview update failed");
            }

            if xhr {
                return plain_text(StatusCode::INTERNAL_SERVER_ERROR, message);
            }
            match service.context(id) {
                Ok(context) => {
                    Redirect::to(&with_query(&context.job_path(), "error", &message))
                        .into_response()
                }
                Err(lookup) if lookup.is_not_found() => not_found(&raw_id),
                Err(_) => plain_text(StatusCode::INTERNAL_SERVER_ERROR, message),
            }
        }
    }
}

pub(crate) async fn calendar_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    Path(raw_id): Path<String>,
) -> Response
where
    R: AdmissionsRepository + 'static,
{
    let Some(stem) = raw_id.strip_suffix(CALENDAR_SUFFIX) else {
        let payload = json!({ "error": "interviews are only available as text/calendar (.ics)" });
        return (StatusCode::NOT_ACCEPTABLE, Json(payload)).into_response();
    };
    let Ok(id) = stem.parse::<u64>().map(InterviewId) else {
        return not_found(stem);
    };

    match service.calendar(id, Utc::now()) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) if err.is_not_found() => not_found(stem),
        Err(err @ InterviewServiceError::Calendar(_)) => plain_text(
            StatusCode::UNPROCESSABLE_ENTITY,
            err.user_message(service.locale()),
        ),
        Err(err) => {
            error!(interview = %id, error = %err, "calendar export failed");
            plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.user_message(service.locale()),
            )
        }
    }
}
