use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use super::calendar::{Calendar, CalendarError, CalendarEvent};
use super::changes::{InterviewChanges, InterviewUpdateRequest, ValidationError};
use super::conflicts::{find_conflicts, ScheduleConflict, SiblingInterview};
use super::deadline::{guard_priority_deadline, DeadlinePassed};
use super::domain::{
    ApplicantStatus, AssignmentStatus, Interview, InterviewField, InterviewId, JobApplicationId,
};
use super::inference::{apply_changes, changed_fields, Inference};
use super::repository::{
    AdmissionsRepository, ApplicationSlot, InterviewContext, RepositoryError,
};
use crate::i18n::{Locale, Message};

/// Service applying admin edits to interviews and exporting them to calendars.
pub struct InterviewService<R> {
    repository: Arc<R>,
    locale: Locale,
}

/// Result of a persisted update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewUpdate {
    pub interview: Interview,
    pub changed: BTreeSet<InterviewField>,
    pub inferred: Inference,
    pub assignment_status: AssignmentStatus,
    pub conflicts: Vec<ScheduleConflict>,
    /// Warning for the last conflict found, if any.
    pub warning: Option<String>,
    pub job_path: String,
}

impl<R> InterviewService<R>
where
    R: AdmissionsRepository + 'static,
{
    pub fn new(repository: Arc<R>, locale: Locale) -> Self {
        Self { repository, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Fetch an interview with its application, applicant, job, group, and admission.
    pub fn context(&self, id: InterviewId) -> Result<InterviewContext, InterviewServiceError> {
        let context = self
            .repository
            .interview_context(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(context)
    }

    /// Validate a raw payload and apply it.
    pub fn update(
        &self,
        id: InterviewId,
        request: InterviewUpdateRequest,
        now: NaiveDateTime,
    ) -> Result<InterviewUpdate, InterviewServiceError> {
        let changes = InterviewChanges::try_from(request)?;
        self.apply(id, changes, now)
    }

    /// Apply validated changes: infer defaults, enforce the priority deadline, persist, and
    /// look for clashing interviews.
    pub fn apply(
        &self,
        id: InterviewId,
        changes: InterviewChanges,
        now: NaiveDateTime,
    ) -> Result<InterviewUpdate, InterviewServiceError> {
        let context = self.context(id)?;
        let past_deadline = context.admission.past_priority_deadline(now);

        let mut draft = context.interview.clone();
        let inferred = apply_changes(&mut draft, &changes, past_deadline);
        let changed = changed_fields(&context.interview, &draft);

        if let Err(err) = guard_priority_deadline(id, &context.admission, &changed, now) {
            warn!(interview = %id, deadline = %err.deadline, "priority change rejected past deadline");
            return Err(err.into());
        }

        if changed.is_empty() {
            debug!(interview = %id, "update carried no changes");
        } else {
            self.repository.update_interview(draft.clone())?;
            info!(
                interview = %id,
                changed = ?changed,
                inferred = ?inferred.fields(),
                "interview updated"
            );
        }

        let applications = self
            .repository
            .applications_of(context.applicant.id)?;
        let conflicts = find_conflicts(
            context.job_application.id,
            draft.time,
            applications.iter().map(sibling_of),
        );

        let applicant_name = context.applicant.full_name();
        for conflict in &conflicts {
            info!(
                interview = %id,
                other_application = %conflict.job_application_id,
                other_time = %conflict.other_time,
                "applicant has another interview nearby"
            );
        }
        let warning = conflicts.last().map(|conflict| {
            Message::OtherInterviewsAreNigh {
                applicant: &applicant_name,
                time: conflict.other_time,
            }
            .render(self.locale)
        });

        let assignment_status =
            assignment_status(context.job_application.id, &draft, &applications);

        Ok(InterviewUpdate {
            job_path: context.job_path(),
            interview: draft,
            changed,
            inferred,
            assignment_status,
            conflicts,
            warning,
        })
    }

    /// Render the interview as a one-event iCalendar document.
    pub fn calendar(
        &self,
        id: InterviewId,
        stamp: DateTime<Utc>,
    ) -> Result<String, InterviewServiceError> {
        let context = self.context(id)?;
        let event = CalendarEvent::for_interview(
            &context.interview,
            &context.job,
            &context.group,
            self.locale,
        )?;

        let mut calendar = Calendar::new();
        calendar.add(event);
        Ok(calendar.to_ical(stamp))
    }
}

fn sibling_of(slot: &ApplicationSlot) -> SiblingInterview {
    SiblingInterview {
        job_application_id: slot.job_application.id,
        time: slot.interview.as_ref().and_then(|interview| interview.time),
    }
}

/// Where the applicant stands, using `current` in place of the stored copy of this interview.
pub fn assignment_status(
    application: JobApplicationId,
    current: &Interview,
    applications: &[ApplicationSlot],
) -> AssignmentStatus {
    if current.applicant_status == Some(ApplicantStatus::Accepted) {
        return AssignmentStatus::AssignedHere;
    }

    let accepted_elsewhere = applications.iter().any(|slot| {
        slot.job_application.id != application
            && slot
                .interview
                .as_ref()
                .and_then(|interview| interview.applicant_status)
                == Some(ApplicantStatus::Accepted)
    });

    if accepted_elsewhere {
        AssignmentStatus::AssignedElsewhere
    } else {
        AssignmentStatus::NotAssigned
    }
}

/// Error raised by the interview service.
#[derive(Debug, thiserror::Error)]
pub enum InterviewServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    DeadlinePassed(#[from] DeadlinePassed),
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl InterviewServiceError {
    /// Text shown to the admin; deadline and calendar failures come from the message catalog.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            InterviewServiceError::DeadlinePassed(err) => err.message(locale),
            InterviewServiceError::Calendar(err) => err.message(locale),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            InterviewServiceError::Persistence(RepositoryError::NotFound)
        )
    }
}
