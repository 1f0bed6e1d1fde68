//! Message catalog for user-facing admissions and ticketing text.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Languages the admin pages are served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "no")]
    Norwegian,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "no" | "nb" | "nn" => Some(Self::Norwegian),
            "en" => Some(Self::English),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Locale::Norwegian => "no",
            Locale::English => "en",
        }
    }
}

/// A catalog entry together with its interpolation arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    IcalSummary { group: &'a str },
    IcalDescription { job: &'a str, group: &'a str },
    CannotSetPriorityPastDeadline,
    OtherInterviewsAreNigh { applicant: &'a str, time: NaiveDateTime },
    NoInterviewTime,
}

impl Message<'_> {
    /// Stable lookup key, used in logs and when clients want to match on the error.
    pub const fn key(&self) -> &'static str {
        match self {
            Message::IcalSummary { .. } => "interviews.ical_summary",
            Message::IcalDescription { .. } => "interviews.ical_description",
            Message::CannotSetPriorityPastDeadline => {
                "interviews.cannot_set_priority_past_deadline"
            }
            Message::OtherInterviewsAreNigh { .. } => "interviews.other_interviews_are_nigh",
            Message::NoInterviewTime => "interviews.no_interview_time",
        }
    }

    pub fn render(&self, locale: Locale) -> String {
        match (self, locale) {
            (Message::IcalSummary { group }, Locale::Norwegian) => {
                format!("Intervju med {group}")
            }
            (Message::IcalSummary { group }, Locale::English) => {
                format!("Interview with {group}")
            }
            (Message::IcalDescription { job, group }, Locale::Norwegian) => {
                format!("Intervju for stillingen {job} i {group}")
            }
            (Message::IcalDescription { job, group }, Locale::English) => {
                format!("Interview for the position {job} in {group}")
            }
            (Message::CannotSetPriorityPastDeadline, Locale::Norwegian) => {
                "Fristen for å sette prioritet har gått ut".to_string()
            }
            (Message::CannotSetPriorityPastDeadline, Locale::English) => {
                "Cannot set priority after the deadline has passed".to_string()
            }
            (Message::OtherInterviewsAreNigh { applicant, time }, Locale::Norwegian) => format!(
                "{applicant} har et annet intervju {}",
                time.format("%d.%m.%Y kl. %H:%M")
            ),
            (Message::OtherInterviewsAreNigh { applicant, time }, Locale::English) => format!(
                "{applicant} has another interview at {}",
                time.format("%Y-%m-%d %H:%M")
            ),
            (Message::NoInterviewTime, Locale::Norwegian) => {
                "Intervjuet har ikke fått noe tidspunkt".to_string()
            }
            (Message::NoInterviewTime, Locale::English) => "No interview time set".to_string(),
        }
    }
}
