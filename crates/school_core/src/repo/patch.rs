//! Partial-update structures for student and teacher records.
//!
//! # Responsibility
//! - Describe field-level updates with statically named optional fields.
//! - Convert string-keyed field maps from outer layers into typed patches.
//!
//! # Invariants
//! - `None` fields are left untouched by the update.
//! - Unknown field keys are rejected, never silently dropped.
//! - Salary text that is not a non-negative integer becomes 0.

use crate::model::teacher::parse_salary;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error converting a string-keyed field map into a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    UnknownField(String),
}

impl Display for PatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(key) => write!(f, "unknown field `{key}`"),
        }
    }
}

impl Error for PatchError {}

/// Optional field updates for a student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl StudentPatch {
    /// Builds a patch from `(key, value)` pairs.
    ///
    /// Accepted keys: `firstname`, `lastname`. Later pairs win over earlier
    /// ones for the same key.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patch = Self::default();
        for (key, value) in fields {
            match key {
                "firstname" => patch.first_name = Some(value.to_string()),
                "lastname" => patch.last_name = Some(value.to_string()),
                other => return Err(PatchError::UnknownField(other.to_string())),
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Optional field updates for a teacher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub salary: Option<u32>,
}

impl TeacherPatch {
    /// Builds a patch from `(key, value)` pairs.
    ///
    /// Accepted keys: `firstname`, `lastname`, `salary`. The salary value is
    /// parsed with [`parse_salary`].
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patch = Self::default();
        for (key, value) in fields {
            match key {
                "firstname" => patch.first_name = Some(value.to_string()),
                "lastname" => patch.last_name = Some(value.to_string()),
                "salary" => patch.salary = Some(parse_salary(value)),
                other => return Err(PatchError::UnknownField(other.to_string())),
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.salary.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{PatchError, StudentPatch, TeacherPatch};

    #[test]
    fn student_patch_maps_known_keys() {
        let patch = StudentPatch::from_fields([("firstname", "John"), ("lastname", "Doe")])
            .expect("known keys should convert");
        assert_eq!(patch.first_name.as_deref(), Some("John"));
        assert_eq!(patch.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn student_patch_rejects_salary_key() {
        let err = StudentPatch::from_fields([("salary", "10")]).expect_err("students have no salary");
        assert_eq!(err, PatchError::UnknownField("salary".to_string()));
    }

    #[test]
    fn teacher_patch_coerces_bad_salary_to_zero() {
        let patch = TeacherPatch::from_fields([("salary", "lots")]).expect("salary key is known");
        assert_eq!(patch.salary, Some(0));
    }

    #[test]
    fn teacher_patch_rejects_unknown_key() {
        let err = TeacherPatch::from_fields([("firstname", "A"), ("age", "40")])
            .expect_err("age is not a teacher field");
        assert_eq!(err, PatchError::UnknownField("age".to_string()));
    }

    #[test]
    fn empty_input_yields_empty_patch() {
        let fields: [(&str, &str); 0] = [];
        assert!(TeacherPatch::from_fields(fields).unwrap().is_empty());
        assert!(StudentPatch::default().is_empty());
    }
}
