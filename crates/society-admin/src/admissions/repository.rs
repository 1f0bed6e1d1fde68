use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    Admission, AdmissionId, Applicant, ApplicantId, Group, GroupId, Interview, InterviewId, Job,
    JobApplication, JobApplicationId, JobId,
};

/// Everything the update and export paths need about one interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewContext {
    pub interview: Interview,
    pub job_application: JobApplication,
    pub applicant: Applicant,
    pub job: Job,
    pub group: Group,
    pub admission: Admission,
}

impl InterviewContext {
    /// Admin page listing the job's applications; where full-page updates land.
    pub fn job_path(&self) -> String {
        format!(
            "/admissions_admin/admissions/{}/groups/{}/jobs/{}",
            self.admission.id, self.group.id, self.job.id
        )
    }
}

/// One of an applicant's job applications with its interview, if scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSlot {
    pub job_application: JobApplication,
    pub interview: Option<Interview>,
}

/// Rows accepted by [`AdmissionsRepository::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionsRecord {
    Admission(Admission),
    Group(Group),
    Job(Job),
    Applicant(Applicant),
    JobApplication(JobApplication),
    Interview(Interview),
}

/// Storage abstraction so the interview service can be exercised in isolation.
pub trait AdmissionsRepository: Send + Sync {
    fn insert(&self, record: AdmissionsRecord) -> Result<(), RepositoryError>;
    fn interview_context(
        &self,
        id: InterviewId,
    ) -> Result<Option<InterviewContext>, RepositoryError>;
    fn applications_of(
        &self,
        applicant: ApplicantId,
    ) -> Result<Vec<ApplicationSlot>, RepositoryError>;
    /// Replace the stored interview in a single write.
    fn update_interview(&self, interview: Interview) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("dangling reference: {0}")]
    Dangling(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Store {
    admissions: BTreeMap<AdmissionId, Admission>,
    groups: BTreeMap<GroupId, Group>,
    jobs: BTreeMap<JobId, Job>,
    applicants: BTreeMap<ApplicantId, Applicant>,
    job_applications: BTreeMap<JobApplicationId, JobApplication>,
    interviews: BTreeMap<InterviewId, Interview>,
}

fn insert_unique<K: Ord, V>(
    map: &mut BTreeMap<K, V>,
    key: K,
    value: V,
) -> Result<(), RepositoryError> {
    if map.contains_key(&key) {
        return Err(RepositoryError::Conflict);
    }
    map.insert(key, value);
    Ok(())
}

fn lookup<'a, K: Ord + std::fmt::Display, V>(
    map: &'a BTreeMap<K, V>,
    key: &K,
    kind: &str,
) -> Result<&'a V, RepositoryError> {
    map.get(key)
        .ok_or_else(|| RepositoryError::Dangling(format!("{kind} {key}")))
}

/// Mutex-guarded maps; the backing store for the API binary, the CLI, and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAdmissionsRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryAdmissionsRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    pub fn interview(&self, id: InterviewId) -> Result<Option<Interview>, RepositoryError> {
        Ok(self.lock()?.interviews.get(&id).cloned())
    }

    pub fn interviews(&self) -> Result<Vec<Interview>, RepositoryError> {
        Ok(self.lock()?.interviews.values().cloned().collect())
    }
}

impl AdmissionsRepository for InMemoryAdmissionsRepository {
    fn insert(&self, record: AdmissionsRecord) -> Result<(), RepositoryError> {
        let mut store = self.lock()?;
        match record {
            AdmissionsRecord::Admission(admission) => {
                insert_unique(&mut store.admissions, admission.id, admission)
            }
            AdmissionsRecord::Group(group) => insert_unique(&mut store.groups, group.id, group),
            AdmissionsRecord::Job(job) => insert_unique(&mut store.jobs, job.id, job),
            AdmissionsRecord::Applicant(applicant) => {
                insert_unique(&mut store.applicants, applicant.id, applicant)
            }
            AdmissionsRecord::JobApplication(application) => {
                insert_unique(&mut store.job_applications, application.id, application)
            }
            AdmissionsRecord::Interview(interview) => {
                if store
                    .interviews
                    .values()
                    .any(|existing| existing.job_application_id == interview.job_application_id)
                {
                    return Err(RepositoryError::Conflict);
                }
                insert_unique(&mut store.interviews, interview.id, interview)
            }
        }
    }

    fn interview_context(
        &self,
        id: InterviewId,
    ) -> Result<Option<InterviewContext>, RepositoryError> {
        let store = self.lock()?;
        let Some(interview) = store.interviews.get(&id) else {
            return Ok(None);
        };

        let job_application = lookup(
            &store.job_applications,
            &interview.job_application_id,
            "job application",
        )?;
        let applicant = lookup(&store.applicants, &job_application.applicant_id, "applicant")?;
        let job = lookup(&store.jobs, &job_application.job_id, "job")?;
        let group = lookup(&store.groups, &job.group_id, "group")?;
        let admission = lookup(&store.admissions, &job.admission_id, "admission")?;

        Ok(Some(InterviewContext {
            interview: interview.clone(),
            job_application: job_application.clone(),
            applicant: applicant.clone(),
            job: job.clone(),
            group: group.clone(),
            admission: admission.clone(),
        }))
    }

    fn applications_of(
        &self,
        applicant: ApplicantId,
    ) -> Result<Vec<ApplicationSlot>, RepositoryError> {
        let store = self.lock()?;
        Ok(store
            .job_applications
            .values()
            .filter(|application| application.applicant_id == applicant)
            .map(|application| ApplicationSlot {
                job_application: application.clone(),
                interview: store
                    .interviews
                    .values()
                    .find(|interview| interview.job_application_id == application.id)
                    .cloned(),
            })
            .collect())
    }

    fn update_interview(&self, interview: Interview) -> Result<(), RepositoryError> {
        let mut store = self.lock()?;
        match store.interviews.get_mut(&interview.id) {
            Some(existing) => {
                *existing = interview;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
