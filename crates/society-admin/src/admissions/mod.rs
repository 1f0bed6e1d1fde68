//! Interview scheduling for the admissions office: admin edits with priority/status inference,
//! the priority deadline, clashing-interview warnings, and calendar export.

pub mod calendar;
pub mod changes;
pub mod conflicts;
pub mod deadline;
pub mod domain;
pub mod inference;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use calendar::{Calendar, CalendarError, CalendarEvent};
pub use changes::{InterviewChanges, InterviewUpdateRequest, ValidationError};
pub use conflicts::{ScheduleConflict, CONFLICT_WINDOW_MINUTES};
pub use deadline::DeadlinePassed;
pub use domain::{
    Admission, AdmissionId, Applicant, ApplicantId, ApplicantStatus, AssignmentStatus, Group,
    GroupId, Interview, InterviewField, InterviewId, Job, JobApplication, JobApplicationId, JobId,
    Priority,
};
pub use inference::Inference;
pub use repository::{
    AdmissionsRecord, AdmissionsRepository, ApplicationSlot, InMemoryAdmissionsRepository,
    InterviewContext, RepositoryError,
};
pub use roster::{RosterImportError, RosterImporter, RosterSummary};
pub use router::interview_router;
pub use service::{InterviewService, InterviewServiceError, InterviewUpdate};
