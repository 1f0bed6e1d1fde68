//! CSV roster import used to seed interview scheduling data.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::changes::parse_interview_time;
use super::domain::{
    Admission, AdmissionId, Applicant, ApplicantId, Group, GroupId, Interview, InterviewId, Job,
    JobApplication, JobApplicationId, JobId,
};
use super::repository::{AdmissionsRecord, AdmissionsRepository, RepositoryError};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidTime {
        line: u64,
        column: &'static str,
        value: String,
    },
    ConflictingDeadline {
        line: u64,
        admission: String,
    },
    Repository(RepositoryError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidTime {
                line,
                column,
                value,
            } => write!(
                f,
                "roster line {}: '{}' in column '{}' is not a valid time",
                line, value, column
            ),
            RosterImportError::ConflictingDeadline { line, admission } => write!(
                f,
                "roster line {}: admission '{}' already has a different priority deadline",
                line, admission
            ),
            RosterImportError::Repository(err) => {
                write!(f, "could not store roster records: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidTime { .. }
            | RosterImportError::ConflictingDeadline { .. } => None,
            RosterImportError::Repository(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RepositoryError> for RosterImportError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// Counts of what an import created, plus the interviews in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSummary {
    pub admissions: usize,
    pub groups: usize,
    pub jobs: usize,
    pub applicants: usize,
    pub interviews: Vec<InterviewId>,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Admission")]
    admission: String,
    #[serde(
        rename = "Priority Deadline",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    priority_deadline: Option<String>,
    #[serde(rename = "Group")]
    group: String,
    #[serde(rename = "Job")]
    job: String,
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(
        rename = "Interview Time",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    interview_time: Option<String>,
    #[serde(rename = "Location", default)]
    location: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn parse_cell(
    value: Option<&str>,
    line: u64,
    column: &'static str,
) -> Result<Option<NaiveDateTime>, RosterImportError> {
    value
        .map(|raw| {
            parse_interview_time(raw).map_err(|_| RosterImportError::InvalidTime {
                line,
                column,
                value: raw.to_string(),
            })
        })
        .transpose()
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P, R>(path: P, repository: &R) -> Result<RosterSummary, RosterImportError>
    where
        P: AsRef<Path>,
        R: AdmissionsRepository + ?Sized,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, repository)
    }

    pub fn from_reader<T, R>(reader: T, repository: &R) -> Result<RosterSummary, RosterImportError>
    where
        T: Read,
        R: AdmissionsRepository + ?Sized,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut admissions: HashMap<String, (AdmissionId, Option<NaiveDateTime>)> =
            HashMap::new();
        let mut groups: HashMap<String, GroupId> = HashMap::new();
        let mut jobs: HashMap<(AdmissionId, GroupId, String), JobId> = HashMap::new();
        let mut applicants: HashMap<String, ApplicantId> = HashMap::new();
        let mut summary = RosterSummary::default();
        let mut next_application = 1;

        let headers = csv_reader.headers()?.clone();
        let mut record = csv::StringRecord::new();
        while csv_reader.read_record(&mut record)? {
            let line = record.position().map_or(0, |position| position.line());
            let row: RosterRow = record.deserialize(Some(&headers))?;

            let deadline =
                parse_cell(row.priority_deadline.as_deref(), line, "Priority Deadline")?;
            let time = parse_cell(row.interview_time.as_deref(), line, "Interview Time")?;

            let admission_id = match admissions.get(&normalize(&row.admission)) {
                Some((_, known)) if deadline.is_some() && deadline != *known => {
                    return Err(RosterImportError::ConflictingDeadline {
                        line,
                        admission: row.admission,
                    });
                }
                Some((id, _)) => *id,
                None => {
                    let id = AdmissionId(admissions.len() as u64 + 1);
                    repository.insert(AdmissionsRecord::Admission(Admission {
                        id,
                        title: row.admission.clone(),
                        priority_deadline: deadline,
                    }))?;
                    admissions.insert(normalize(&row.admission), (id, deadline));
                    id
                }
            };

            let group_id = match groups.get(&normalize(&row.group)) {
                Some(id) => *id,
                None => {
                    let id = GroupId(groups.len() as u64 + 1);
                    repository.insert(AdmissionsRecord::Group(Group {
                        id,
                        name: row.group.clone(),
                    }))?;
                    groups.insert(normalize(&row.group), id);
                    id
                }
            };

            let job_key = (admission_id, group_id, normalize(&row.job));
            let job_id = match jobs.get(&job_key) {
                Some(id) => *id,
                None => {
                    let id = JobId(jobs.len() as u64 + 1);
                    repository.insert(AdmissionsRecord::Job(Job {
                        id,
                        admission_id,
                        group_id,
                        title: row.job.clone(),
                    }))?;
                    jobs.insert(job_key, id);
                    id
                }
            };

            let applicant_key = normalize(&format!("{} {}", row.first_name, row.last_name));
            let applicant_id = match applicants.get(&applicant_key) {
                Some(id) => *id,
                None => {
                    let id = ApplicantId(applicants.len() as u64 + 1);
                    repository.insert(AdmissionsRecord::Applicant(Applicant {
                        id,
                        first_name: row.first_name.clone(),
                        last_name: row.last_name.clone(),
                    }))?;
                    applicants.insert(applicant_key, id);
                    id
                }
            };

            let application_id = JobApplicationId(next_application);
            let interview_id = InterviewId(next_application);
            next_application += 1;

            repository.insert(AdmissionsRecord::JobApplication(JobApplication {
                id: application_id,
                applicant_id,
                job_id,
            }))?;
            repository.insert(AdmissionsRecord::Interview(Interview::scheduled(
                interview_id,
                application_id,
                time,
                row.location,
            )))?;
            summary.interviews.push(interview_id);
        }

        summary.admissions = admissions.len();
        summary.groups = groups.len();
        summary.jobs = jobs.len();
        summary.applicants = applicants.len();
        Ok(summary)
    }
}
