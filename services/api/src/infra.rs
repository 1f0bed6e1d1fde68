use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use society_admin::admissions::{
    changes::parse_interview_time, InMemoryAdmissionsRepository, RosterImporter,
};
use society_admin::error::AppError;
use society_admin::i18n::Locale;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory store, seeded from a roster CSV when one is given.
pub(crate) fn load_repository(
    roster: Option<&Path>,
) -> Result<Arc<InMemoryAdmissionsRepository>, AppError> {
    let repository = Arc::new(InMemoryAdmissionsRepository::default());
    if let Some(path) = roster {
        let summary = RosterImporter::from_path(path, repository.as_ref())?;
        info!(
            roster = %path.display(),
            admissions = summary.admissions,
            jobs = summary.jobs,
            applicants = summary.applicants,
            interviews = summary.interviews.len(),
            "roster imported"
        );
    }
    Ok(repository)
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale '{raw}' (expected no or en)"))
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveDateTime, String> {
    parse_interview_time(raw)
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD HH:MM ({err})"))
}
