use rusqlite::Connection;
use school_core::db::open_db_in_memory;
use school_core::{
    Activity, ActivityRepository, Evaluation, EvaluationRepository, ReportService, ServiceError,
    SqliteActivityRepository, SqliteEvaluationRepository, SqliteStudentRepository, Student,
    StudentRepository, Teacher,
};
use uuid::Uuid;

fn grade(conn: &mut Connection, student: &Student, activity: &Activity, score: i32) {
    SqliteEvaluationRepository::try_new(conn)
        .unwrap()
        .assign_infos(&mut Evaluation::new(score), activity, student)
        .unwrap();
}

fn activity_taught_by(conn: &mut Connection, teacher: &Teacher, name: &str, ects: u32) -> Activity {
    let mut activity = Activity::new(name, ects);
    SqliteActivityRepository::try_new(conn)
        .unwrap()
        .assign_teacher(&mut activity, teacher)
        .unwrap();
    activity
}

#[test]
fn report_weights_scores_by_credits() {
    let mut conn = open_db_in_memory().unwrap();
    let teacher = Teacher::new("Marie", "Curie", 3200);
    let ana = Student::new("Ana", "Pop");
    let a = activity_taught_by(&mut conn, &teacher, "A", 3);
    let b = activity_taught_by(&mut conn, &teacher, "B", 2);
    grade(&mut conn, &ana, &a, 15);
    grade(&mut conn, &ana, &b, 10);

    let service = ReportService::new(SqliteStudentRepository::try_new(&conn).unwrap());
    let report = service.student_report(ana.id()).unwrap();

    assert_eq!(report.average, 13.0);
    assert_eq!(
        report.bulletin,
        "Bulletin de Ana Pop\nA: 15/20\nB: 10/20\nMoyenne: 13"
    );
    assert_eq!(report.student.evaluations.len(), 2);
}

#[test]
fn report_ignores_other_students_evaluations() {
    let mut conn = open_db_in_memory().unwrap();
    let teacher = Teacher::new("Marie", "Curie", 3200);
    let ana = Student::new("Ana", "Pop");
    let ion = Student::new("Ion", "Ionescu");
    let physics = activity_taught_by(&mut conn, &teacher, "Physics", 4);
    grade(&mut conn, &ana, &physics, 18);
    grade(&mut conn, &ion, &physics, 6);

    let service = ReportService::new(SqliteStudentRepository::try_new(&conn).unwrap());
    let report = service.student_report(ion.id()).unwrap();

    assert_eq!(report.average, 6.0);
    assert_eq!(report.bulletin, "Bulletin de Ion Ionescu\nPhysics: 6/20\nMoyenne: 6");
}

#[test]
fn student_without_evaluations_averages_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();

    let report = ReportService::new(repo).student_report(student.id()).unwrap();
    assert_eq!(report.average, 0.0);
    assert_eq!(report.bulletin, "Bulletin de Ana Pop\nMoyenne: 0");
}

#[test]
fn zero_credit_activities_do_not_move_the_average() {
    let mut conn = open_db_in_memory().unwrap();
    let teacher = Teacher::new("Marie", "Curie", 3200);
    let ana = Student::new("Ana", "Pop");
    let seminar = activity_taught_by(&mut conn, &teacher, "Seminar", 0);
    let lab = activity_taught_by(&mut conn, &teacher, "Lab", 5);
    grade(&mut conn, &ana, &seminar, 2);
    grade(&mut conn, &ana, &lab, 14);

    let service = ReportService::new(SqliteStudentRepository::try_new(&conn).unwrap());
    assert_eq!(service.student_report(ana.id()).unwrap().average, 14.0);
}

#[test]
fn report_for_missing_student_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = ReportService::new(SqliteStudentRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let err = service.student_report(missing).unwrap_err();
    assert!(matches!(err, ServiceError::StudentNotFound(id) if id == missing));
}
