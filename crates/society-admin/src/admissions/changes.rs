use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::domain::{ApplicantStatus, InterviewField, Priority};

/// Raw update payload as posted by the admin pages, either JSON or a url-encoded form.
///
/// `None` means the key was absent. `Some(None)` means it was sent as `null` or an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterviewUpdateRequest {
    #[serde(default, alias = "interview[time]", deserialize_with = "present")]
    pub time: Option<Option<String>>,
    #[serde(default, alias = "interview[location]", deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, alias = "interview[comment]", deserialize_with = "present")]
    pub comment: Option<Option<String>>,
    #[serde(default, alias = "interview[priority]", deserialize_with = "present")]
    pub priority: Option<Option<String>>,
    #[serde(
        default,
        alias = "interview[applicant_status]",
        deserialize_with = "present"
    )]
    pub applicant_status: Option<Option<String>>,
}

impl InterviewUpdateRequest {
    /// Read a JSON body. Fields may sit at the top level or inside an `interview` object; when
    /// that object is present it is the only thing read.
    pub fn from_json(body: serde_json::Value) -> Result<Self, ValidationError> {
        let fields = match body {
            serde_json::Value::Object(mut top) => match top.remove("interview") {
                Some(nested) => nested,
                None => serde_json::Value::Object(top),
            },
            other => other,
        };
        serde_json::from_value(fields).map_err(|err| ValidationError::MalformedBody {
            reason: err.to_string(),
        })
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Validated set of fields supplied in one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewChanges {
    pub time: Option<Option<NaiveDateTime>>,
    pub location: Option<String>,
    pub comment: Option<String>,
    pub priority: Option<Option<Priority>>,
    pub applicant_status: Option<Option<ApplicantStatus>>,
}

impl InterviewChanges {
    pub fn with_time(mut self, time: Option<NaiveDateTime>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(Some(priority));
        self
    }

    pub fn with_applicant_status(mut self, status: ApplicantStatus) -> Self {
        self.applicant_status = Some(Some(status));
        self
    }

    pub fn supplied_fields(&self) -> Vec<InterviewField> {
        let mut fields = Vec::new();
        if self.time.is_some() {
            fields.push(InterviewField::Time);
        }
        if self.location.is_some() {
            fields.push(InterviewField::Location);
        }
        if self.comment.is_some() {
            fields.push(InterviewField::Comment);
        }
        if self.priority.is_some() {
            fields.push(InterviewField::Priority);
        }
        if self.applicant_status.is_some() {
            fields.push(InterviewField::ApplicantStatus);
        }
        fields
    }
}

impl TryFrom<InterviewUpdateRequest> for InterviewChanges {
    type Error = ValidationError;

    fn try_from(request: InterviewUpdateRequest) -> Result<Self, Self::Error> {
        let time = request
            .time
            .map(|value| match blank_to_none(value) {
                Some(raw) => parse_interview_time(&raw).map(Some),
                None => Ok(None),
            })
            .transpose()?;

        let priority = request
            .priority
            .map(|value| match blank_to_none(value) {
                Some(raw) => Priority::parse(&raw)
                    .map(Some)
                    .ok_or(ValidationError::UnknownPriority { value: raw }),
                None => Ok(None),
            })
            .transpose()?;

        let applicant_status = request
            .applicant_status
            .map(|value| match blank_to_none(value) {
                Some(raw) => ApplicantStatus::parse(&raw)
                    .map(Some)
                    .ok_or(ValidationError::UnknownApplicantStatus { value: raw }),
                None => Ok(None),
            })
            .transpose()?;

        Ok(Self {
            time,
            location: request.location.map(Option::unwrap_or_default),
            comment: request.comment.map(Option::unwrap_or_default),
            priority,
            applicant_status,
        })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

const TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the wall-clock formats the scheduling table submits.
pub fn parse_interview_time(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::InvalidTime {
            value: raw.to_string(),
        })
}

/// Rejected update payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{value}' is not a valid interview time (expected YYYY-MM-DDTHH:MM)")]
    InvalidTime { value: String },
    #[error("'{value}' is not a valid priority")]
    UnknownPriority { value: String },
    #[error("'{value}' is not a valid applicant status")]
    UnknownApplicantStatus { value: String },
    #[error("malformed interview update: {reason}")]
    MalformedBody { reason: String },
}
