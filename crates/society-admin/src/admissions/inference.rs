//! Default-filling between priority and applicant status.
//!
//! Each rule is a guarded function that reports the value it would fill in, so the update path
//! applies supplied fields and inferred defaults in one visible order.

use std::collections::BTreeSet;

use super::changes::InterviewChanges;
use super::domain::{ApplicantStatus, Interview, InterviewField, Priority};

/// Values filled in by inference during a single update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inference {
    pub applicant_status: Option<ApplicantStatus>,
    pub priority: Option<Priority>,
}

impl Inference {
    pub fn is_empty(&self) -> bool {
        self.applicant_status.is_none() && self.priority.is_none()
    }

    pub fn fields(&self) -> Vec<InterviewField> {
        let mut fields = Vec::new();
        if self.priority.is_some() {
            fields.push(InterviewField::Priority);
        }
        if self.applicant_status.is_some() {
            fields.push(InterviewField::ApplicantStatus);
        }
        fields
    }
}

/// A `not_wanted` priority rejects an applicant that has no status yet.
pub fn status_for_priority(
    previous_status: Option<ApplicantStatus>,
    new_priority: Option<Priority>,
) -> Option<ApplicantStatus> {
    match (previous_status, new_priority) {
        (None, Some(Priority::NotWanted)) => Some(ApplicantStatus::Rejected),
        _ => None,
    }
}

/// A rejection marks an unprioritized applicant as `not_wanted`, unless priorities are frozen.
pub fn priority_for_status(
    current_priority: Option<Priority>,
    new_status: Option<ApplicantStatus>,
    past_deadline: bool,
) -> Option<Priority> {
    if past_deadline || current_priority.is_some() {
        return None;
    }

    match new_status {
        Some(status) if status.is_rejection() => Some(Priority::NotWanted),
        _ => None,
    }
}

/// Write the supplied fields onto `draft`, then fill inferred defaults.
pub fn apply_changes(
    draft: &mut Interview,
    changes: &InterviewChanges,
    past_deadline: bool,
) -> Inference {
    let mut inference = Inference::default();

    if let Some(time) = changes.time {
        draft.time = time;
    }
    if let Some(location) = &changes.location {
        draft.location = location.clone();
    }
    if let Some(comment) = &changes.comment {
        draft.comment = comment.clone();
    }

    if let Some(priority) = changes.priority {
        draft.priority = priority;
        if changes.applicant_status.is_none() {
            if let Some(status) = status_for_priority(draft.applicant_status, priority) {
                draft.applicant_status = Some(status);
                inference.applicant_status = Some(status);
            }
        }
    }

    if let Some(status) = changes.applicant_status {
        draft.applicant_status = status;
        if let Some(priority) = priority_for_status(draft.priority, status, past_deadline) {
            draft.priority = Some(priority);
            inference.priority = Some(priority);
        }
    }

    inference
}

/// Fields whose stored value differs between two versions of an interview.
pub fn changed_fields(before: &Interview, after: &Interview) -> BTreeSet<InterviewField> {
    let mut fields = BTreeSet::new();
    if before.time != after.time {
        fields.insert(InterviewField::Time);
    }
    if before.location != after.location {
        fields.insert(InterviewField::Location);
    }
    if before.comment != after.comment {
        fields.insert(InterviewField::Comment);
    }
    if before.priority != after.priority {
        fields.insert(InterviewField::Priority);
    }
    if before.applicant_status != after.applicant_status {
        fields.insert(InterviewField::ApplicantStatus);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::domain::{InterviewId, JobApplicationId};

    fn blank_interview() -> Interview {
        Interview::scheduled(InterviewId(1), JobApplicationId(1), None, "Lyche")
    }

    #[test]
    fn rejection_infers_not_wanted_before_deadline() {
        let mut draft = blank_interview();
        let changes = InterviewChanges::default().with_applicant_status(ApplicantStatus::Rejected);

        let inference = apply_changes(&mut draft, &changes, false);

        assert_eq!(draft.priority, Some(Priority::NotWanted));
        assert_eq!(inference.priority, Some(Priority::NotWanted));
        assert_eq!(inference.fields(), vec![InterviewField::Priority]);
    }

    #[test]
    fn rejection_leaves_priority_unset_after_deadline() {
        let mut draft = blank_interview();
        let changes = InterviewChanges::default().with_applicant_status(ApplicantStatus::RejectedM);

        let inference = apply_changes(&mut draft, &changes, true);

        assert_eq!(draft.priority, None);
        assert_eq!(draft.applicant_status, Some(ApplicantStatus::RejectedM));
        assert!(inference.is_empty());
    }

    #[test]
    fn not_wanted_infers_rejection_regardless_of_deadline() {
        for past_deadline in [false, true] {
            let mut draft = blank_interview();
            let changes = InterviewChanges::default().with_priority(Priority::NotWanted);

            let inference = apply_changes(&mut draft, &changes, past_deadline);

            assert_eq!(draft.applicant_status, Some(ApplicantStatus::Rejected));
            assert_eq!(inference.applicant_status, Some(ApplicantStatus::Rejected));
        }
    }

    #[test]
    fn existing_values_are_never_overwritten_by_inference() {
        let mut draft = blank_interview();
        draft.applicant_status = Some(ApplicantStatus::Reserve);
        let changes = InterviewChanges::default().with_priority(Priority::NotWanted);
        assert!(apply_changes(&mut draft, &changes, false).is_empty());
        assert_eq!(draft.applicant_status, Some(ApplicantStatus::Reserve));

        let mut draft = blank_interview();
        draft.priority = Some(Priority::Wanted);
        let changes = InterviewChanges::default().with_applicant_status(ApplicantStatus::Rejected);
        assert!(apply_changes(&mut draft, &changes, false).is_empty());
        assert_eq!(draft.priority, Some(Priority::Wanted));
    }

    #[test]
    fn supplied_status_wins_over_inferred_rejection() {
        let mut draft = blank_interview();
        let changes = InterviewChanges::default()
            .with_priority(Priority::NotWanted)
            .with_applicant_status(ApplicantStatus::Accepted);

        let inference = apply_changes(&mut draft, &changes, false);

        assert_eq!(draft.applicant_status, Some(ApplicantStatus::Accepted));
        assert_eq!(draft.priority, Some(Priority::NotWanted));
        assert!(inference.is_empty());
    }

    #[test]
    fn other_combinations_do_not_infer() {
        assert_eq!(status_for_priority(None, Some(Priority::Wanted)), None);
        assert_eq!(status_for_priority(None, None), None);
        assert_eq!(
            priority_for_status(None, Some(ApplicantStatus::Accepted), false),
            None
        );
        assert_eq!(priority_for_status(None, None, false), None);
    }

    #[test]
    fn changed_fields_ignores_reassigned_equal_values() {
        let before = blank_interview();
        let mut after = before.clone();
        after.location = "Lyche".to_string();
        after.comment = "Bring portfolio".to_string();

        let fields = changed_fields(&before, &after);
        assert_eq!(fields.into_iter().collect::<Vec<_>>(), vec![InterviewField::Comment]);
    }
}
