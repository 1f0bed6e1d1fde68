use chrono::{NaiveDate, NaiveDateTime};
use society_admin::admissions::{
    AdmissionsRepository, InMemoryAdmissionsRepository, InterviewId, RosterImportError,
    RosterImporter,
};

const HEADER: &str =
    "Admission,Priority Deadline,Group,Job,First Name,Last Name,Interview Time,Location\n";

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

#[test]
fn importer_deduplicates_shared_records() {
    let csv = format!(
        "{HEADER}\
Høstopptak 2024,2024-08-25 23:59,Kulturutvalget,Arrangementsansvarlig,Kari,Nordmann,2024-08-27 10:00,Storsalen\n\
høstopptak  2024,,Lyche,Barsjef,Kari,Nordmann,2024-08-27T11:00,Lyche\n\
Høstopptak 2024,,Lyche,Barsjef,Ola,Hansen,,\n"
    );
    let repository = InMemoryAdmissionsRepository::default();

    let summary =
        RosterImporter::from_reader(csv.as_bytes(), &repository).expect("import succeeds");

    assert_eq!(summary.admissions, 1, "admission names match case-insensitively");
    assert_eq!(summary.groups, 2);
    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.applicants, 2);
    assert_eq!(
        summary.interviews,
        vec![InterviewId(1), InterviewId(2), InterviewId(3)]
    );

    let context = repository
        .interview_context(InterviewId(2))
        .expect("store readable")
        .expect("interview stored");
    assert_eq!(context.interview.time, Some(at(27, 11, 0)));
    assert_eq!(context.admission.priority_deadline, Some(at(25, 23, 59)));
    assert_eq!(context.applicant.full_name(), "Kari Nordmann");
    assert_eq!(context.group.name, "Lyche");

    let unscheduled = repository
        .interview(InterviewId(3))
        .expect("store readable")
        .expect("interview stored");
    assert_eq!(unscheduled.time, None);
    assert_eq!(unscheduled.location, "");

    let kari = repository
        .applications_of(context.applicant.id)
        .expect("store readable");
    assert_eq!(kari.len(), 2);
    assert!(kari.iter().all(|slot| slot.interview.is_some()));
}

#[test]
fn importer_reports_the_offending_line() {
    let csv = format!(
        "{HEADER}\
Høstopptak 2024,,Lyche,Barsjef,Kari,Nordmann,2024-08-27 10:00,Lyche\n\
Høstopptak 2024,,Lyche,Barsjef,Ola,Hansen,next tuesday,Lyche\n"
    );
    let repository = InMemoryAdmissionsRepository::default();

    let err = RosterImporter::from_reader(csv.as_bytes(), &repository)
        .expect_err("bad time rejected");

    match err {
        RosterImportError::InvalidTime {
            line,
            column,
            ref value,
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "Interview Time");
            assert_eq!(value, "next tuesday");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("roster line 3"));
}

#[test]
fn line_numbers_account_for_multi_line_cells() {
    let csv = format!(
        "{HEADER}\
Høstopptak 2024,,Lyche,Barsjef,Kari,Nordmann,2024-08-27 10:00,\"Lyche\n2. etasje\"\n\
Høstopptak 2024,,Lyche,Barsjef,Ola,Hansen,soon,Lyche\n"
    );
    let repository = InMemoryAdmissionsRepository::default();

    let err = RosterImporter::from_reader(csv.as_bytes(), &repository)
        .expect_err("bad time rejected");

    assert!(
        matches!(err, RosterImportError::InvalidTime { line: 4, .. }),
        "unexpected error: {err}"
    );
    let first = repository
        .interview(InterviewId(1))
        .expect("store readable")
        .expect("first row stored");
    assert_eq!(first.location, "Lyche\n2. etasje");
}

#[test]
fn importer_rejects_conflicting_deadlines() {
    let csv = format!(
        "{HEADER}\
Høstopptak 2024,2024-08-25 23:59,Lyche,Barsjef,Kari,Nordmann,,\n\
Høstopptak 2024,,Lyche,Barsjef,Ola,Hansen,,\n\
Høstopptak 2024,2024-08-30 12:00,Lyche,Barsjef,Per,Olsen,,\n"
    );
    let repository = InMemoryAdmissionsRepository::default();

    let err = RosterImporter::from_reader(csv.as_bytes(), &repository)
        .expect_err("second deadline rejected");

    match err {
        RosterImportError::ConflictingDeadline {
            line,
            ref admission,
        } => {
            assert_eq!(line, 4);
            assert_eq!(admission, "Høstopptak 2024");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn importer_rejects_missing_columns() {
    let csv = "Admission,Group\nHøstopptak 2024,Lyche\n";
    let repository = InMemoryAdmissionsRepository::default();

    let err = RosterImporter::from_reader(csv.as_bytes(), &repository)
        .expect_err("incomplete header rejected");
    assert!(matches!(err, RosterImportError::Csv(_)));
}
