use school_core::db::open_db_in_memory;
use school_core::{
    Activity, ActivityRepository, RepoError, SqliteActivityRepository, SqliteTeacherRepository,
    Teacher, TeacherPatch, TeacherRepository,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip_keeps_salary() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();

    let teacher = Teacher::new("Marie", "Curie", 3200);
    let id = repo.create_teacher(&teacher).unwrap();

    let loaded = repo.get_teacher(id).unwrap().unwrap();
    assert_eq!(loaded, teacher);
    assert_eq!(loaded.salary, 3200);
}

#[test]
fn list_returns_all_teachers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();

    let first = Teacher::new("Marie", "Curie", 3200);
    let second = Teacher::new("Alan", "Turing", 4100);
    repo.create_teacher(&first).unwrap();
    repo.create_teacher(&second).unwrap();

    let ids: Vec<_> = repo
        .list_teachers()
        .unwrap()
        .iter()
        .map(Teacher::id)
        .collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[test]
fn string_keyed_patch_with_bad_salary_stores_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();

    let teacher = Teacher::new("Marie", "Curie", 3200);
    repo.create_teacher(&teacher).unwrap();

    let patch = TeacherPatch::from_fields([("firstname", "John"), ("salary", "a lot")]).unwrap();
    repo.update_teacher(teacher.id(), &patch).unwrap();

    let loaded = repo.get_teacher(teacher.id()).unwrap().unwrap();
    assert_eq!(loaded.first_name(), "John");
    assert_eq!(loaded.last_name(), "Curie");
    assert_eq!(loaded.salary, 0);
}

#[test]
fn patch_updates_salary_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();

    let teacher = Teacher::new("Marie", "Curie", 3200);
    repo.create_teacher(&teacher).unwrap();

    let patch = TeacherPatch {
        salary: Some(1000),
        ..TeacherPatch::default()
    };
    repo.update_teacher(teacher.id(), &patch).unwrap();
    repo.update_teacher(teacher.id(), &patch).unwrap();

    let loaded = repo.get_teacher(teacher.id()).unwrap().unwrap();
    assert_eq!(loaded.salary, 1000);
    assert_eq!(loaded.first_name(), "Marie");
}

#[test]
fn patch_on_missing_teacher_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();
    let missing = Uuid::new_v4();

    let patch = TeacherPatch {
        salary: Some(10),
        ..TeacherPatch::default()
    };
    let err = repo.update_teacher(missing, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn deleting_missing_teacher_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();
    let missing = Uuid::new_v4();

    let err = repo.delete_teacher(missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn teacher_owning_activities_is_not_deleted() {
    let mut conn = open_db_in_memory().unwrap();
    let teacher = Teacher::new("Marie", "Curie", 3200);
    let mut activity = Activity::new("Physics", 5);
    SqliteActivityRepository::try_new(&mut conn)
        .unwrap()
        .assign_teacher(&mut activity, &teacher)
        .unwrap();

    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();
    let err = repo.delete_teacher(teacher.id()).unwrap_err();
    assert!(matches!(err, RepoError::InUse(id) if id == teacher.id()));

    drop(repo);
    SqliteActivityRepository::try_new(&mut conn)
        .unwrap()
        .delete_activity(activity.id())
        .unwrap();
    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();
    repo.delete_teacher(teacher.id()).unwrap();
    assert!(repo.get_teacher(teacher.id()).unwrap().is_none());
}

#[test]
fn load_activities_returns_only_this_teachers_activities() {
    let mut conn = open_db_in_memory().unwrap();
    let mut curie = Teacher::new("Marie", "Curie", 3200);
    let turing = Teacher::new("Alan", "Turing", 4100);

    let mut physics = Activity::new("Physics", 5);
    let mut chemistry = Activity::new("Chemistry", 3);
    let mut computing = Activity::new("Computing", 6);
    {
        let mut activities = SqliteActivityRepository::try_new(&mut conn).unwrap();
        activities.assign_teacher(&mut physics, &curie).unwrap();
        activities.assign_teacher(&mut computing, &turing).unwrap();
        activities.assign_teacher(&mut chemistry, &curie).unwrap();
    }

    let repo = SqliteTeacherRepository::try_new(&conn).unwrap();
    assert!(curie.activities.is_empty());
    repo.load_activities(&mut curie).unwrap();

    let names: Vec<_> = curie
        .activities
        .iter()
        .map(|activity| activity.name.as_str())
        .collect();
    assert_eq!(names, vec!["Physics", "Chemistry"]);
    assert!(curie
        .activities
        .iter()
        .all(|activity| activity.teacher_id == Some(curie.id())));
}
