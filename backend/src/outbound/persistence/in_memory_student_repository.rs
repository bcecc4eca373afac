//! In-memory [`StudentRepository`] with an optional JSON records file.
//!
//! Records live in a `RwLock`-guarded vector kept in insertion order, so
//! class listings come back in registration order. Uniqueness checks and the
//! insert happen under one write guard. When a records file is configured,
//! every mutation is applied to a copy, written through a temporary file and
//! a rename, and only then published; a failed write leaves the store as it
//! was. A separate async mutex serialises mutations so an older snapshot can
//! never overwrite a newer one.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::models::StudentDocument;
use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{ClassGroup, EmailAddress, Semester, Student, StudentId};

/// Student store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
    records_path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

fn poisoned<T>(_: PoisonError<T>) -> StudentPersistenceError {
    StudentPersistenceError::connection("student store lock poisoned")
}

fn io_error(path: &Path, err: &std::io::Error) -> StudentPersistenceError {
    StudentPersistenceError::connection(format!("records file {}: {err}", path.display()))
}

/// Name of the first unique field `candidate` shares with `existing`.
fn clashing_field(existing: &Student, candidate: &Student) -> Option<&'static str> {
    if existing.email() == candidate.email() {
        Some("email")
    } else if existing.roll_no() == candidate.roll_no() {
        Some("rollNo")
    } else if existing.username() == candidate.username() {
        Some("username")
    } else {
        None
    }
}

fn push_unique(
    students: &mut Vec<Student>,
    student: Student,
) -> Result<(), StudentPersistenceError> {
    if let Some(field) = students
        .iter()
        .find_map(|existing| clashing_field(existing, &student))
    {
        return Err(StudentPersistenceError::duplicate(field));
    }
    students.push(student);
    Ok(())
}

impl InMemoryStudentRepository {
    /// Empty store with no records file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading existing records if the file
    /// is present.
    ///
    /// A missing file starts an empty store; it is created on the first
    /// mutation. Unreadable JSON, invalid records or duplicate unique fields
    /// fail the load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StudentPersistenceError> {
        let path = path.into();
        let students = match tokio::fs::read(&path).await {
            Ok(bytes) => Self::decode(&path, &bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "records file absent; starting empty");
                Vec::new()
            }
            Err(err) => return Err(io_error(&path, &err)),
        };
        info!(path = %path.display(), students = students.len(), "records loaded");
        Ok(Self {
            students: RwLock::new(students),
            records_path: Some(path),
            write_lock: Mutex::new(()),
        })
    }

    fn decode(path: &Path, bytes: &[u8]) -> Result<Vec<Student>, StudentPersistenceError> {
        let documents: Vec<StudentDocument> = serde_json::from_slice(bytes).map_err(|err| {
            StudentPersistenceError::query(format!("records file {}: {err}", path.display()))
        })?;
        let mut students = Vec::with_capacity(documents.len());
        for doc in documents {
            push_unique(&mut students, Student::try_from(doc)?)?;
        }
        Ok(students)
    }

    async fn write_records(&self, students: &[Student]) -> Result<(), StudentPersistenceError> {
        let Some(path) = self.records_path.as_deref() else {
            return Ok(());
        };
        let documents: Vec<StudentDocument> = students.iter().map(StudentDocument::from).collect();
        let json = serde_json::to_vec_pretty(&documents)
            .map_err(|err| StudentPersistenceError::query(format!("encode records: {err}")))?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|err| io_error(&tmp, &err))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|err| io_error(path, &err))?;
        debug!(path = %path.display(), students = documents.len(), "records written");
        Ok(())
    }

    /// Apply `mutate` to a copy of the records, persist the copy, then
    /// publish it. Nothing becomes visible unless the write succeeded.
    async fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<Student>) -> Result<T, StudentPersistenceError>,
    ) -> Result<T, StudentPersistenceError> {
        let _ordered = self.write_lock.lock().await;
        let mut next = self.students.read().map_err(poisoned)?.clone();
        let value = mutate(&mut next)?;
        self.write_records(&next).await?;
        *self.students.write().map_err(poisoned)? = next;
        Ok(value)
    }

    fn find(
        &self,
        predicate: impl Fn(&Student) -> bool,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        let guard = self.students.read().map_err(poisoned)?;
        Ok(guard.iter().find(|s| predicate(s)).cloned())
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        let student = student.clone();
        self.mutate(move |students| push_unique(students, student)).await
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        self.find(|s| s.id() == id)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.find(|s| s.email() == email)
    }

    async fn find_by_group(
        &self,
        group: &ClassGroup,
    ) -> Result<Vec<Student>, StudentPersistenceError> {
        let guard = self.students.read().map_err(poisoned)?;
        Ok(guard.iter().filter(|s| s.group() == group).cloned().collect())
    }

    async fn append_semester(
        &self,
        id: &StudentId,
        semester: &Semester,
    ) -> Result<Student, StudentPersistenceError> {
        let semester = semester.clone();
        self.mutate(|students| {
            let student = students
                .iter_mut()
                .find(|s| s.id() == id)
                .ok_or_else(|| StudentPersistenceError::not_found(id.to_string()))?;
            let number = semester.number();
            student
                .append_semester(semester)
                .map_err(|_| StudentPersistenceError::duplicate_semester(number))?;
            Ok(student.clone())
        })
        .await
    }
}

#[cfg(test)]
#[path = "in_memory_student_repository_tests.rs"]
mod tests;
