//! Stored document shape for student records.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. The layout mirrors the records file: one JSON object per
//! student, camelCase keys, semesters embedded.

use serde::{Deserialize, Serialize};

use crate::domain::ports::StudentPersistenceError;
use crate::domain::{
    ClassGroup, EmailAddress, PasswordDigest, RollNumber, Semester, Student, StudentId,
    StudentIdentity, Username, year_text,
};

/// One student as written to the records file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StudentDocument {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub department: String,
    pub branch: String,
    #[serde(deserialize_with = "year_text")]
    pub year: String,
    #[serde(default)]
    pub semesters: Vec<Semester>,
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub cgpa: Option<f64>,
}

impl From<&Student> for StudentDocument {
    fn from(student: &Student) -> Self {
        let group = student.group();
        Self {
            id: student.id().to_string(),
            name: student.name().to_owned(),
            roll_no: student.roll_no().to_string(),
            department: group.department().to_owned(),
            branch: group.branch().to_owned(),
            year: group.year().to_owned(),
            semesters: student.semesters().to_vec(),
            email: student.email().to_string(),
            password: student.password().as_str().to_owned(),
            username: student.username().to_string(),
            cgpa: student.stored_cgpa(),
        }
    }
}

impl TryFrom<StudentDocument> for Student {
    type Error = StudentPersistenceError;

    fn try_from(doc: StudentDocument) -> Result<Self, Self::Error> {
        let corrupt = |err: &dyn std::fmt::Display| {
            StudentPersistenceError::query(format!("stored student {} is invalid: {err}", doc.id))
        };
        let id = StudentId::new(&doc.id).map_err(|e| corrupt(&e))?;
        let identity = StudentIdentity::new(
            doc.name.as_str(),
            RollNumber::new(doc.roll_no.as_str()).map_err(|e| corrupt(&e))?,
            EmailAddress::new(doc.email.as_str()).map_err(|e| corrupt(&e))?,
            Username::new(doc.username.as_str()).map_err(|e| corrupt(&e))?,
        )
        .map_err(|e| corrupt(&e))?;
        let group = ClassGroup::new(
            doc.department.as_str(),
            doc.branch.as_str(),
            doc.year.as_str(),
        )
        .map_err(|e| corrupt(&e))?;
        let student = Self::new(id, identity, group, PasswordDigest::new(doc.password.as_str()))
            .with_semesters(doc.semesters.iter().cloned())
            .map_err(|e| corrupt(&e))?
            .with_stored_cgpa(doc.cgpa);
        Ok(student)
    }
}
