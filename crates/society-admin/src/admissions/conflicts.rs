use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::domain::JobApplicationId;

/// Two interviews for one applicant closer than this are flagged.
pub const CONFLICT_WINDOW_MINUTES: i64 = 29;

/// Another of the applicant's interviews, as seen from the one being saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingInterview {
    pub job_application_id: JobApplicationId,
    pub time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleConflict {
    pub job_application_id: JobApplicationId,
    pub other_time: NaiveDateTime,
}

/// Sibling interviews scheduled strictly inside the window around `current_time`.
///
/// Siblings without a time, and the current application itself, are skipped. Nothing is flagged
/// when the current interview has no time.
pub fn find_conflicts<I>(
    current_application: JobApplicationId,
    current_time: Option<NaiveDateTime>,
    siblings: I,
) -> Vec<ScheduleConflict>
where
    I: IntoIterator<Item = SiblingInterview>,
{
    let Some(current_time) = current_time else {
        return Vec::new();
    };
    let window = Duration::minutes(CONFLICT_WINDOW_MINUTES);

    siblings
        .into_iter()
        .filter(|sibling| sibling.job_application_id != current_application)
        .filter_map(|sibling| {
            let other_time = sibling.time?;
            let inside = other_time > current_time - window && other_time < current_time + window;
            inside.then_some(ScheduleConflict {
                job_application_id: sibling.job_application_id,
                other_time,
            })
        })
        .collect()
}
