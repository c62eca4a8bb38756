//! Roster use-case service for students and teachers.
//!
//! # Responsibility
//! - Register and remove students and teachers.
//! - Apply string-keyed field updates through typed patches.
//!
//! # Invariants
//! - Unknown field keys abort the update before any write.
//! - Patches are committed as one `UPDATE` per record.

use crate::model::student::{Student, StudentId};
use crate::model::teacher::{Teacher, TeacherId};
use crate::repo::patch::{StudentPatch, TeacherPatch};
use crate::repo::student_repo::StudentRepository;
use crate::repo::teacher_repo::TeacherRepository;
use crate::repo::RepoError;
use crate::service::ServiceError;
use log::{info, warn};

/// Roster service over student and teacher repositories.
pub struct RosterService<S: StudentRepository, T: TeacherRepository> {
    students: S,
    teachers: T,
}

impl<S: StudentRepository, T: TeacherRepository> RosterService<S, T> {
    pub fn new(students: S, teachers: T) -> Self {
        Self { students, teachers }
    }

    /// Creates and stores a new student.
    pub fn enroll_student(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Student, ServiceError> {
        let student = Student::new(first_name, last_name);
        self.students.create_student(&student)?;
        info!(
            "event=student_enroll module=service status=ok student_id={}",
            student.id()
        );
        Ok(student)
    }

    /// Creates and stores a new teacher.
    pub fn hire_teacher(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        salary: u32,
    ) -> Result<Teacher, ServiceError> {
        let teacher = Teacher::new(first_name, last_name, salary);
        self.teachers.create_teacher(&teacher)?;
        info!(
            "event=teacher_hire module=service status=ok teacher_id={}",
            teacher.id()
        );
        Ok(teacher)
    }

    /// Applies `firstname`/`lastname` updates and returns the stored student.
    pub fn alter_student_fields<'a, I>(
        &self,
        id: StudentId,
        fields: I,
    ) -> Result<Student, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let patch = StudentPatch::from_fields(fields).inspect_err(|err| {
            warn!("event=student_alter module=service status=error student_id={id} error={err}");
        })?;
        self.students
            .update_student(id, &patch)
            .map_err(|err| student_error(id, err))?;
        self.students
            .get_student(id)?
            .ok_or(ServiceError::StudentNotFound(id))
    }

    /// Applies `firstname`/`lastname`/`salary` updates and returns the
    /// stored teacher.
    pub fn alter_teacher_fields<'a, I>(
        &self,
        id: TeacherId,
        fields: I,
    ) -> Result<Teacher, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let patch = TeacherPatch::from_fields(fields).inspect_err(|err| {
            warn!("event=teacher_alter module=service status=error teacher_id={id} error={err}");
        })?;
        self.teachers
            .update_teacher(id, &patch)
            .map_err(|err| teacher_error(id, err))?;
        self.teachers
            .get_teacher(id)?
            .ok_or(ServiceError::TeacherNotFound(id))
    }

    pub fn remove_student(&self, id: StudentId) -> Result<(), ServiceError> {
        self.students
            .delete_student(id)
            .map_err(|err| student_error(id, err))?;
        info!("event=student_remove module=service status=ok student_id={id}");
        Ok(())
    }

    pub fn remove_teacher(&self, id: TeacherId) -> Result<(), ServiceError> {
        self.teachers
            .delete_teacher(id)
            .map_err(|err| teacher_error(id, err))?;
        info!("event=teacher_remove module=service status=ok teacher_id={id}");
        Ok(())
    }

    pub fn students(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(self.students.list_students()?)
    }

    pub fn teachers(&self) -> Result<Vec<Teacher>, ServiceError> {
        Ok(self.teachers.list_teachers()?)
    }
}

fn student_error(id: StudentId, err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(missing) if missing == id => ServiceError::StudentNotFound(id),
        other => ServiceError::Repo(other),
    }
}

fn teacher_error(id: TeacherId, err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(missing) if missing == id => ServiceError::TeacherNotFound(id),
        other => ServiceError::Repo(other),
    }
}
