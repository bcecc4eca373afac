//! Academic records domain service.
//!
//! Fetches raw records through [`StudentRepository`] and hands them to the
//! metrics engine. A missing student short-circuits before any metric is
//! computed; an empty class group is reported as "no peer data" rather than
//! an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::metrics::rank_peer_group;
use crate::domain::ports::{
    AcademicRecordsCommand, AcademicRecordsQuery, ClassStandings, StudentReport,
    StudentRepository,
};
use crate::domain::{ClassGroup, EmailAddress, Error, Semester, Student, StudentId};

const STUDENT_NOT_FOUND: &str = "student not found";

/// Academic records service implementing the query and command ports.
#[derive(Clone)]
pub struct AcademicRecordsService<R> {
    students: Arc<R>,
}

impl<R> AcademicRecordsService<R> {
    /// Create a new service over the student store.
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

impl<R> AcademicRecordsService<R>
where
    R: StudentRepository,
{
    async fn require_by_email(&self, email: &EmailAddress) -> Result<Student, Error> {
        self.students
            .find_by_email(email)
            .await?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }

    async fn standings_for(&self, group: &ClassGroup) -> Result<ClassStandings, Error> {
        let peers = self.students.find_by_group(group).await?;
        debug!(group = %group, peers = peers.len(), "peer group fetched");
        Ok(ClassStandings {
            group: group.clone(),
            peer_data_available: !peers.is_empty(),
            standings: rank_peer_group(&peers),
        })
    }
}

#[async_trait]
impl<R> AcademicRecordsQuery for AcademicRecordsService<R>
where
    R: StudentRepository,
{
    async fn student_report(&self, email: &EmailAddress) -> Result<StudentReport, Error> {
        let student = self.require_by_email(email).await?;
        Ok(StudentReport::for_student(student))
    }

    async fn student_report_by_id(&self, id: &StudentId) -> Result<StudentReport, Error> {
        let student = self
            .students
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;
        Ok(StudentReport::for_student(student))
    }

    async fn class_standings(&self, group: &ClassGroup) -> Result<ClassStandings, Error> {
        self.standings_for(group).await
    }

    async fn classmates_of(&self, email: &EmailAddress) -> Result<ClassStandings, Error> {
        let student = self.require_by_email(email).await?;
        self.standings_for(student.group()).await
    }
}

#[async_trait]
impl<R> AcademicRecordsCommand for AcademicRecordsService<R>
where
    R: StudentRepository,
{
    async fn record_semester(
        &self,
        id: &StudentId,
        semester: Semester,
    ) -> Result<StudentReport, Error> {
        let number = semester.number();
        let student = self.students.append_semester(id, &semester).await?;
        info!(student_id = %id, semester = number, "semester recorded");
        Ok(StudentReport::for_student(student))
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over a mocked store.
    use super::*;
    use crate::domain::ports::{MockStudentRepository, StudentPersistenceError};
    use crate::domain::{ErrorCode, PasswordDigest, RollNumber, StudentIdentity, Subject, Username};
    use rstest::rstest;

    fn group() -> ClassGroup {
        ClassGroup::new("Engineering", "CSE", "2").expect("group")
    }

    fn student(roll: &str, marks: &[f64]) -> Student {
        let identity = StudentIdentity::new(
            format!("Student {roll}"),
            RollNumber::new(roll).expect("roll"),
            EmailAddress::new(format!("s{roll}@example.edu")).expect("email"),
            Username::new(format!("student{roll}")).expect("username"),
        )
        .expect("identity");
        let subjects = marks
            .iter()
            .map(|m| Subject::new("Maths", Some(*m)).expect("subject"))
            .collect();
        Student::new(StudentId::random(), identity, group(), PasswordDigest::new("h"))
            .with_semesters([Semester::new(1, subjects).expect("semester")])
            .expect("student")
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw).expect("email")
    }

    #[rstest]
    #[tokio::test]
    async fn student_report_derives_metrics_from_semesters() {
        let mut repo = MockStudentRepository::new();
        // The cached value is stale on purpose; reads must ignore it.
        let record = student("1", &[80.0, 60.0]).with_stored_cgpa(Some(12.0));
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(record)));

        let report = AcademicRecordsService::new(Arc::new(repo))
            .student_report(&email("s1@example.edu"))
            .await
            .expect("report");
        assert!((report.summary.cgpa - 70.0).abs() < f64::EPSILON);
        assert_eq!(report.summary.semesters.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_student_short_circuits() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_email().return_once(|_| Ok(None));
        repo.expect_find_by_group().never();

        let error = AcademicRecordsService::new(Arc::new(repo))
            .classmates_of(&email("ghost@example.edu"))
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "student not found");
    }

    #[rstest]
    #[tokio::test]
    async fn classmates_of_ranks_the_students_group() {
        let me = student("1", &[90.0]);
        let peers = vec![student("2", &[50.0]), me.clone(), student("3", &[])];
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(me)));
        repo.expect_find_by_group()
            .withf(|g| *g == group())
            .return_once(move |_| Ok(peers));

        let standings = AcademicRecordsService::new(Arc::new(repo))
            .classmates_of(&email("s1@example.edu"))
            .await
            .expect("standings");
        assert!(standings.peer_data_available);
        let rolls: Vec<&str> = standings
            .standings
            .iter()
            .map(|s| s.roll_no.as_str())
            .collect();
        assert_eq!(rolls, vec!["2", "1", "3"]);
        assert!(standings.standings[2].cgpa.abs() < f64::EPSILON);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_group_reports_no_peer_data() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_group().return_once(|_| Ok(Vec::new()));

        let standings = AcademicRecordsService::new(Arc::new(repo))
            .class_standings(&group())
            .await
            .expect("empty standings");
        assert!(!standings.peer_data_available);
        assert!(standings.standings.is_empty());
    }

    #[rstest]
    #[case(StudentPersistenceError::duplicate_semester(1_u32), ErrorCode::Conflict)]
    #[case(StudentPersistenceError::not_found("x"), ErrorCode::NotFound)]
    #[case(StudentPersistenceError::query("disk full"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn record_semester_maps_store_errors(
        #[case] failure: StudentPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockStudentRepository::new();
        repo.expect_append_semester()
            .return_once(move |_, _| Err(failure));

        let error = AcademicRecordsService::new(Arc::new(repo))
            .record_semester(&StudentId::random(), Semester::new(1, Vec::new()).expect("sem"))
            .await
            .expect_err("append fails");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn record_semester_returns_refreshed_report() {
        let updated = student("1", &[40.0]);
        let id = updated.id().clone();
        let mut repo = MockStudentRepository::new();
        repo.expect_append_semester()
            .withf(|_, semester| semester.number() == 1)
            .return_once(move |_, _| Ok(updated));

        let report = AcademicRecordsService::new(Arc::new(repo))
            .record_semester(&id, Semester::new(1, Vec::new()).expect("sem"))
            .await
            .expect("recorded");
        assert_eq!(report.student.id(), &id);
        assert!((report.summary.cgpa - 40.0).abs() < f64::EPSILON);
    }
}
