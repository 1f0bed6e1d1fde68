use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::domain::{Admission, InterviewField, InterviewId};
use crate::i18n::{Locale, Message};

/// The priority of an interview was changed after its admission froze priorities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot set priority on interview {interview_id} past the deadline {deadline}")]
pub struct DeadlinePassed {
    pub interview_id: InterviewId,
    pub deadline: NaiveDateTime,
}

impl DeadlinePassed {
    pub const MESSAGE_KEY: &'static str = "interviews.cannot_set_priority_past_deadline";

    pub fn message(&self, locale: Locale) -> String {
        Message::CannotSetPriorityPastDeadline.render(locale)
    }
}

/// Reject the update when priority changed after the admission's deadline.
pub fn guard_priority_deadline(
    interview_id: InterviewId,
    admission: &Admission,
    changed: &BTreeSet<InterviewField>,
    now: NaiveDateTime,
) -> Result<(), DeadlinePassed> {
    match admission.priority_deadline {
        Some(deadline) if now > deadline && changed.contains(&InterviewField::Priority) => {
            Err(DeadlinePassed {
                interview_id,
                deadline,
            })
        }
        _ => Ok(()),
    }
}
