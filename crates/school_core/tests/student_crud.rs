use rusqlite::Connection;
use school_core::db::migrations::latest_version;
use school_core::db::open_db_in_memory;
use school_core::{
    Activity, ActivityRepository, Evaluation, EvaluationRepository, RepoError,
    SqliteActivityRepository, SqliteEvaluationRepository, SqliteStudentRepository, Student,
    StudentPatch, StudentRepository, Teacher,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let student = Student::new("Ana", "Pop");
    let id = repo.create_student(&student).unwrap();

    let loaded = repo.get_student(id).unwrap().unwrap();
    assert_eq!(loaded.id(), student.id());
    assert_eq!(loaded.first_name(), "Ana");
    assert_eq!(loaded.last_name(), "Pop");
    assert!(loaded.evaluations.is_empty());
}

#[test]
fn get_missing_student_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    assert!(repo.get_student(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn creating_same_student_twice_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();
    let err = repo.create_student(&student).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyExists(id) if id == student.id()));
    assert_eq!(repo.list_students().unwrap().len(), 1);
}

#[test]
fn list_returns_students_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let names = [("Ana", "Pop"), ("Ion", "Ionescu"), ("Eva", "Marin")];
    for (first, last) in names {
        repo.create_student(&Student::new(first, last)).unwrap();
    }

    let listed: Vec<_> = repo
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.first_name().to_string())
        .collect();
    assert_eq!(listed, vec!["Ana", "Ion", "Eva"]);
}

#[test]
fn patch_updates_only_given_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();

    let patch = StudentPatch {
        last_name: Some("Popescu".to_string()),
        ..StudentPatch::default()
    };
    repo.update_student(student.id(), &patch).unwrap();

    let loaded = repo.get_student(student.id()).unwrap().unwrap();
    assert_eq!(loaded.first_name(), "Ana");
    assert_eq!(loaded.last_name(), "Popescu");
}

#[test]
fn applying_same_patch_twice_matches_applying_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();
    let patch = StudentPatch::from_fields([("firstname", "John"), ("lastname", "Doe")]).unwrap();

    repo.update_student(student.id(), &patch).unwrap();
    let once = repo.get_student(student.id()).unwrap().unwrap();
    repo.update_student(student.id(), &patch).unwrap();
    let twice = repo.get_student(student.id()).unwrap().unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.first_name(), "John");
}

#[test]
fn patch_on_missing_student_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let missing = Uuid::new_v4();

    let patch = StudentPatch {
        first_name: Some("Ghost".to_string()),
        ..StudentPatch::default()
    };
    let err = repo.update_student(missing, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));

    let err = repo
        .update_student(missing, &StudentPatch::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_student_and_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();
    repo.delete_student(student.id()).unwrap();
    assert!(repo.get_student(student.id()).unwrap().is_none());

    let err = repo.delete_student(student.id()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == student.id()));
}

#[test]
fn student_with_evaluations_cannot_be_deleted() {
    let mut conn = open_db_in_memory().unwrap();
    let student = Student::new("Ana", "Pop");
    let teacher = Teacher::new("Marie", "Curie", 3000);
    let mut activity = Activity::new("Physics", 5);
    SqliteActivityRepository::try_new(&mut conn)
        .unwrap()
        .assign_teacher(&mut activity, &teacher)
        .unwrap();
    SqliteEvaluationRepository::try_new(&mut conn)
        .unwrap()
        .assign_infos(&mut Evaluation::new(12), &activity, &student)
        .unwrap();

    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let err = repo.delete_student(student.id()).unwrap_err();
    assert!(matches!(err, RepoError::InUse(id) if id == student.id()));
    assert!(repo.get_student(student.id()).unwrap().is_some());
}

#[test]
fn load_evaluations_is_empty_for_new_student() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut student = Student::new("Ana", "Pop");
    repo.create_student(&student).unwrap();
    repo.load_evaluations(&mut student).unwrap();
    assert!(student.evaluations.is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStudentRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_students_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStudentRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("students"))
    ));
}
