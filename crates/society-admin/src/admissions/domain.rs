use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of an admission round.
    AdmissionId
);
record_id!(GroupId);
record_id!(JobId);
record_id!(ApplicantId);
record_id!(JobApplicationId);
record_id!(
    /// Identifier of an interview; one per job application.
    InterviewId
);

/// An admission round. Priorities are frozen once `priority_deadline` has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub id: AdmissionId,
    pub title: String,
    pub priority_deadline: Option<NaiveDateTime>,
}

impl Admission {
    pub fn past_priority_deadline(&self, now: NaiveDateTime) -> bool {
        self.priority_deadline
            .map(|deadline| now > deadline)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub admission_id: AdmissionId,
    pub group_id: GroupId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: JobApplicationId,
    pub applicant_id: ApplicantId,
    pub job_id: JobId,
}

/// Interviewer's ranking of an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    NotWanted,
    Wanted,
    VeryWanted,
    Reserve,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "not_wanted" => Some(Self::NotWanted),
            "wanted" => Some(Self::Wanted),
            "very_wanted" => Some(Self::VeryWanted),
            "reserve" => Some(Self::Reserve),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Priority::NotWanted => "not_wanted",
            Priority::Wanted => "wanted",
            Priority::VeryWanted => "very_wanted",
            Priority::Reserve => "reserve",
        }
    }
}

/// Outcome recorded for the applicant on this job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    Accepted,
    Rejected,
    /// The second rejection flavour the admissions office distinguishes in its outcome lists.
    RejectedM,
    Reserve,
}

impl ApplicantStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "rejected_m" => Some(Self::RejectedM),
            "reserve" => Some(Self::Reserve),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Accepted => "accepted",
            ApplicantStatus::Rejected => "rejected",
            ApplicantStatus::RejectedM => "rejected_m",
            ApplicantStatus::Reserve => "reserve",
        }
    }

    pub const fn is_rejection(self) -> bool {
        matches!(self, ApplicantStatus::Rejected | ApplicantStatus::RejectedM)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub job_application_id: JobApplicationId,
    pub time: Option<NaiveDateTime>,
    pub location: String,
    pub comment: String,
    pub priority: Option<Priority>,
    pub applicant_status: Option<ApplicantStatus>,
}

impl Interview {
    /// A freshly scheduled interview with no outcome recorded yet.
    pub fn scheduled(
        id: InterviewId,
        job_application_id: JobApplicationId,
        time: Option<NaiveDateTime>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            job_application_id,
            time,
            location: location.into(),
            comment: String::new(),
            priority: None,
            applicant_status: None,
        }
    }
}

/// Where the applicant currently stands across all of their job applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    NotAssigned,
    AssignedHere,
    AssignedElsewhere,
}

impl AssignmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentStatus::NotAssigned => "not_assigned",
            AssignmentStatus::AssignedHere => "assigned_here",
            AssignmentStatus::AssignedElsewhere => "assigned_elsewhere",
        }
    }
}

/// Fields an admin may edit on an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewField {
    Time,
    Location,
    Comment,
    Priority,
    ApplicantStatus,
}
