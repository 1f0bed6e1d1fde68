use std::sync::Arc;

use axum::response::Response;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::admissions::domain::{
    Admission, AdmissionId, Applicant, ApplicantId, Group, GroupId, Interview, InterviewId, Job,
    JobApplication, JobApplicationId, JobId,
};
use crate::admissions::repository::{
    AdmissionsRecord, AdmissionsRepository, ApplicationSlot, InMemoryAdmissionsRepository,
    InterviewContext, RepositoryError,
};
use crate::admissions::service::InterviewService;
use crate::i18n::Locale;

pub(super) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

pub(super) fn deadline() -> NaiveDateTime {
    at(12, 0)
}

pub(super) fn before_deadline() -> NaiveDateTime {
    deadline() - Duration::hours(1)
}

pub(super) fn after_deadline() -> NaiveDateTime {
    deadline() + Duration::hours(1)
}

pub(super) const FIRST: InterviewId = InterviewId(1);
pub(super) const SECOND: InterviewId = InterviewId(2);

/// One applicant, Kari Nordmann, applying for two jobs in different groups.
///
/// Interview 1 is at 10:00; interview 2 is at `second_time`.
pub(super) fn seeded_repository(
    second_time: Option<NaiveDateTime>,
) -> InMemoryAdmissionsRepository {
    let repository = InMemoryAdmissionsRepository::default();
    let records = vec![
        AdmissionsRecord::Admission(Admission {
            id: AdmissionId(1),
            title: "Høstopptak 2024".to_string(),
            priority_deadline: Some(deadline()),
        }),
        AdmissionsRecord::Group(Group {
            id: GroupId(1),
            name: "Kulturutvalget".to_string(),
        }),
        AdmissionsRecord::Group(Group {
            id: GroupId(2),
            name: "Lyche".to_string(),
        }),
        AdmissionsRecord::Job(Job {
            id: JobId(1),
            admission_id: AdmissionId(1),
            group_id: GroupId(1),
            title: "Arrangementsansvarlig".to_string(),
        }),
        AdmissionsRecord::Job(Job {
            id: JobId(2),
            admission_id: AdmissionId(1),
            group_id: GroupId(2),
            title: "Barsjef".to_string(),
        }),
        AdmissionsRecord::Applicant(Applicant {
            id: ApplicantId(1),
            first_name: "Kari".to_string(),
            last_name: "Nordmann".to_string(),
        }),
        AdmissionsRecord::JobApplication(JobApplication {
            id: JobApplicationId(1),
            applicant_id: ApplicantId(1),
            job_id: JobId(1),
        }),
        AdmissionsRecord::JobApplication(JobApplication {
            id: JobApplicationId(2),
            applicant_id: ApplicantId(1),
            job_id: JobId(2),
        }),
        AdmissionsRecord::Interview(Interview::scheduled(
            FIRST,
            JobApplicationId(1),
            Some(at(10, 0)),
            "Storsalen",
        )),
        AdmissionsRecord::Interview(Interview::scheduled(
            SECOND,
            JobApplicationId(2),
            second_time,
            "Lyche",
        )),
    ];

    for record in records {
        repository.insert(record).expect("seed record inserts");
    }
    repository
}

pub(super) fn build_service(
    second_time: Option<NaiveDateTime>,
) -> (
    InterviewService<InMemoryAdmissionsRepository>,
    Arc<InMemoryAdmissionsRepository>,
) {
    let repository = Arc::new(seeded_repository(second_time));
    let service = InterviewService::new(repository.clone(), Locale::English);
    (service, repository)
}

pub(super) fn stored(repository: &InMemoryAdmissionsRepository, id: InterviewId) -> Interview {
    repository
        .interview(id)
        .expect("repository available")
        .expect("interview present")
}

/// Reads succeed against a seeded store; writes always fail.
pub(super) struct ReadOnlyRepository(pub(super) InMemoryAdmissionsRepository);

impl AdmissionsRepository for ReadOnlyRepository {
    fn insert(&self, _record: AdmissionsRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn interview_context(
        &self,
        id: InterviewId,
    ) -> Result<Option<InterviewContext>, RepositoryError> {
        self.0.interview_context(id)
    }

    fn applications_of(
        &self,
        applicant: ApplicantId,
    ) -> Result<Vec<ApplicationSlot>, RepositoryError> {
        self.0.applications_of(applicant)
    }

    fn update_interview(&self, _interview: Interview) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    String::from_utf8(read_body(response).await).expect("utf-8 body")
}
