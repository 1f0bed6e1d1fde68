use crate::infra::{load_repository, parse_locale, parse_time};
use chrono::{NaiveDateTime, Utc};
use clap::Args;
use society_admin::admissions::changes::parse_interview_time;
use society_admin::admissions::{
    ApplicantStatus, InMemoryAdmissionsRepository, InterviewChanges, InterviewId,
    InterviewService, InterviewServiceError, InterviewUpdate, RosterImporter,
};
use society_admin::error::AppError;
use society_admin::i18n::Locale;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_ROSTER: &str = include_str!("../fixtures/demo_roster.csv");
const DEMO_NOW: &str = "2024-08-20 12:00";

#[derive(Args, Debug)]
pub(crate) struct CalendarArgs {
    /// Roster CSV holding the interview
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Interview id (row number in the roster, starting at 1)
    #[arg(long)]
    pub(crate) interview: u64,
    /// Language for the event text (no, en)
    #[arg(long, value_parser = parse_locale, default_value = "no")]
    pub(crate) locale: Locale,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Roster CSV to run the session against. Defaults to a bundled sample.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Wall-clock time the edits are made at (YYYY-MM-DD HH:MM). Defaults to before the sample
    /// roster's priority deadline.
    #[arg(long, value_parser = parse_time)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Language for warnings and calendar text (no, en)
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
}

pub(crate) fn run_calendar(args: CalendarArgs) -> Result<(), AppError> {
    let repository = load_repository(Some(&args.roster))?;
    let service = InterviewService::new(repository, args.locale);
    let ical = service.calendar(InterviewId(args.interview), Utc::now())?;
    print!("{ical}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster,
        now,
        locale,
    } = args;

    let repository = match roster {
        Some(path) => load_repository(Some(&path))?,
        None => {
            let repository = Arc::new(InMemoryAdmissionsRepository::default());
            let summary =
                RosterImporter::from_reader(Cursor::new(DEMO_ROSTER), repository.as_ref())?;
            println!(
                "Loaded sample roster: {} admission(s), {} job(s), {} applicant(s), {} interview(s)",
                summary.admissions,
                summary.jobs,
                summary.applicants,
                summary.interviews.len()
            );
            repository
        }
    };
    let now = match now {
        Some(now) => now,
        None => parse_interview_time(DEMO_NOW).map_err(InterviewServiceError::from)?,
    };
    let service = InterviewService::new(repository, locale.unwrap_or_default());

    println!("\n== Session at {} ==", now.format("%Y-%m-%d %H:%M"));

    let first = InterviewId(1);
    let second = InterviewId(2);
    let second_time = service.context(second)?.interview.time;
    let moved = second_time.map(|time| time - chrono::Duration::minutes(15));

    println!("\n-- Move interview {first} next to interview {second} --");
    let update = service.apply(first, InterviewChanges::default().with_time(moved), now)?;
    print_update(&update);

    println!("\n-- Reject the applicant on interview {second} --");
    let update = service.apply(
        second,
        InterviewChanges::default().with_applicant_status(ApplicantStatus::Rejected),
        now,
    )?;
    print_update(&update);

    println!("\n-- Calendar export for interview {first} --");
    match service.calendar(first, Utc::now()) {
        Ok(ical) => print!("{ical}"),
        Err(err) => println!("  {}", err.user_message(service.locale())),
    }

    Ok(())
}

fn print_update(update: &InterviewUpdate) {
    let time = update
        .interview
        .time
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("  time:               {time}");
    println!(
        "  priority:           {}",
        update.interview.priority.map(|p| p.label()).unwrap_or("-")
    );
    println!(
        "  applicant status:   {}",
        update
            .interview
            .applicant_status
            .map(|s| s.label())
            .unwrap_or("-")
    );
    println!("  assignment status:  {}", update.assignment_status.label());
    if !update.inferred.is_empty() {
        println!("  inferred:           {:?}", update.inferred.fields());
    }
    if let Some(warning) = &update.warning {
        println!("  warning:            {warning}");
    }
}
