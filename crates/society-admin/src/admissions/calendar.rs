//! iCalendar (RFC 5545) rendering of scheduled interviews.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::domain::{Group, Interview, InterviewId, Job};
use crate::i18n::{Locale, Message};

pub const INTERVIEW_LENGTH_MINUTES: i64 = 30;

const PRODID: &str = "-//society-admin//interviews//EN";
const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("No interview time set for interview {interview_id}")]
    MissingTime { interview_id: InterviewId },
}

impl CalendarError {
    pub fn message(&self, locale: Locale) -> String {
        match self {
            CalendarError::MissingTime { .. } => Message::NoInterviewTime.render(locale),
        }
    }
}

/// One VEVENT. Start and end are floating local times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
    pub description: String,
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn for_interview(
        interview: &Interview,
        job: &Job,
        group: &Group,
        locale: Locale,
    ) -> Result<Self, CalendarError> {
        let start = interview.time.ok_or(CalendarError::MissingTime {
            interview_id: interview.id,
        })?;

        let summary = Message::IcalSummary { group: &group.name }.render(locale);
        let description = Message::IcalDescription {
            job: &job.title,
            group: &group.name,
        }
        .render(locale);
        let location = Some(interview.location.trim())
            .filter(|location| !location.is_empty())
            .map(str::to_string);

        Ok(Self {
            uid: format!("interview-{}@society-admin", interview.id),
            start,
            end: start + Duration::minutes(INTERVIEW_LENGTH_MINUTES),
            summary,
            description,
            location,
        })
    }
}

/// A published calendar document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn to_ical(&self, stamp: DateTime<Utc>) -> String {
        let mut out = String::new();
        let stamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{PRODID}"));
        push_line(&mut out, "CALSCALE:GREGORIAN");
        push_line(&mut out, "METHOD:PUBLISH");
        for event in &self.events {
            push_line(&mut out, "BEGIN:VEVENT");
            push_line(&mut out, &format!("UID:{}", event.uid));
            push_line(&mut out, &format!("DTSTAMP:{stamp}"));
            push_line(
                &mut out,
                &format!("DTSTART:{}", event.start.format(LOCAL_FORMAT)),
            );
            push_line(&mut out, &format!("DTEND:{}", event.end.format(LOCAL_FORMAT)));
            push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.summary)));
            push_line(
                &mut out,
                &format!("DESCRIPTION:{}", escape_text(&event.description)),
            );
            if let Some(location) = &event.location {
                push_line(&mut out, &format!("LOCATION:{}", escape_text(location)));
            }
            push_line(&mut out, "END:VEVENT");
        }
        push_line(&mut out, "END:VCALENDAR");
        out
    }
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Append a content line, folding at 75 octets without splitting a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}
