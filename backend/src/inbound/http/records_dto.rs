//! Response payloads for academic record endpoints.
//!
//! These types only copy values already computed by the metrics engine and
//! round them for display. Full precision stays in the domain.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::metrics::{PeerStanding, SemesterGpa, SubjectMarks, round_for_display};
use crate::domain::ports::{ClassStandings, StudentReport};

/// Label for the scale every GPA/CGPA value is expressed on.
pub const GRADING_SCALE: &str = "0-100";

/// Marks of one subject, absent marks shown as zero.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMarksResponse {
    #[schema(example = "Mathematics")]
    pub name: String,
    #[schema(example = 87.5)]
    pub marks: f64,
}

impl From<SubjectMarks> for SubjectMarksResponse {
    fn from(value: SubjectMarks) -> Self {
        Self {
            name: value.name,
            marks: round_for_display(value.marks),
        }
    }
}

/// One semester with its GPA.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterReportResponse {
    #[schema(example = 1)]
    pub semester: u32,
    #[schema(example = 78.25)]
    pub gpa: f64,
    pub subjects: Vec<SubjectMarksResponse>,
}

impl From<SemesterGpa> for SemesterReportResponse {
    fn from(value: SemesterGpa) -> Self {
        Self {
            semester: value.semester,
            gpa: round_for_display(value.gpa),
            subjects: value.subjects.into_iter().map(Into::into).collect(),
        }
    }
}

/// Student profile with per-semester GPA and CGPA.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "CS-042")]
    pub roll_no: String,
    #[schema(example = "ada@example.edu")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "CSE")]
    pub branch: String,
    #[schema(example = "2")]
    pub year: String,
    pub semesters: Vec<SemesterReportResponse>,
    #[schema(example = 78.25)]
    pub cgpa: f64,
    #[schema(example = "0-100")]
    pub scale: &'static str,
}

impl From<StudentReport> for StudentProfileResponse {
    fn from(report: StudentReport) -> Self {
        let StudentReport { student, summary } = report;
        let group = student.group();
        Self {
            id: student.id().to_string(),
            name: student.name().to_owned(),
            roll_no: student.roll_no().to_string(),
            email: student.email().to_string(),
            username: student.username().to_string(),
            department: group.department().to_owned(),
            branch: group.branch().to_owned(),
            year: group.year().to_owned(),
            semesters: summary.semesters.into_iter().map(Into::into).collect(),
            cgpa: round_for_display(summary.cgpa),
            scale: GRADING_SCALE,
        }
    }
}

/// One row of a class comparison.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StandingResponse {
    #[schema(example = "CS-042")]
    pub roll_no: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = 78.25)]
    pub cgpa: f64,
}

impl From<PeerStanding> for StandingResponse {
    fn from(value: PeerStanding) -> Self {
        Self {
            roll_no: value.roll_no,
            name: value.name,
            cgpa: round_for_display(value.cgpa),
        }
    }
}

/// CGPA of every student in a class group, in record order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassStandingsResponse {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "CSE")]
    pub branch: String,
    #[schema(example = "2")]
    pub year: String,
    /// False when the group has no students at all.
    pub peer_data_available: bool,
    #[schema(example = "0-100")]
    pub scale: &'static str,
    pub standings: Vec<StandingResponse>,
}

impl From<ClassStandings> for ClassStandingsResponse {
    fn from(value: ClassStandings) -> Self {
        let ClassStandings {
            group,
            standings,
            peer_data_available,
        } = value;
        Self {
            department: group.department().to_owned(),
            branch: group.branch().to_owned(),
            year: group.year().to_owned(),
            peer_data_available,
            scale: GRADING_SCALE,
            standings: standings.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ClassGroup, EmailAddress, PasswordDigest, RollNumber, Semester, Student, StudentId,
        StudentIdentity, Subject, Username,
    };
    use rstest::rstest;
    use serde_json::json;

    fn student_with(semesters: Vec<Semester>) -> Student {
        let identity = StudentIdentity::new(
            "Ada Lovelace",
            RollNumber::new("CS-042").expect("roll"),
            EmailAddress::new("ada@example.edu").expect("email"),
            Username::new("ada").expect("username"),
        )
        .expect("identity");
        Student::new(
            StudentId::random(),
            identity,
            ClassGroup::new("Engineering", "CSE", "2").expect("group"),
            PasswordDigest::new("digest"),
        )
        .with_semesters(semesters)
        .expect("semesters")
    }

    fn semester(number: u32, marks: &[Option<f64>]) -> Semester {
        let subjects = marks
            .iter()
            .enumerate()
            .map(|(i, m)| Subject::new(format!("S{i}"), *m).expect("subject"))
            .collect();
        Semester::new(number, subjects).expect("semester")
    }

    #[rstest]
    fn profile_rounds_only_at_the_boundary() {
        let student = student_with(vec![
            semester(1, &[Some(100.0)]),
            semester(2, &[Some(0.0), None]),
        ]);
        let response = StudentProfileResponse::from(StudentReport::for_student(student));
        let value = serde_json::to_value(&response).expect("serialises");
        assert_eq!(value["cgpa"], json!(33.33));
        assert_eq!(value["semesters"][0]["gpa"], json!(100.0));
        assert_eq!(value["semesters"][1]["gpa"], json!(0.0));
        assert_eq!(value["semesters"][1]["subjects"][1]["marks"], json!(0.0));
        assert_eq!(value["rollNo"], "CS-042");
        assert_eq!(value["scale"], GRADING_SCALE);
        assert!(value.get("password").is_none());
    }

    #[rstest]
    fn standings_keep_order_and_round() {
        let standings = ClassStandings {
            group: ClassGroup::new("Engineering", "CSE", "2").expect("group"),
            standings: vec![
                PeerStanding {
                    roll_no: "2".into(),
                    name: "B".into(),
                    cgpa: 66.666_666,
                },
                PeerStanding {
                    roll_no: "1".into(),
                    name: "A".into(),
                    cgpa: 0.0,
                },
            ],
            peer_data_available: true,
        };
        let value =
            serde_json::to_value(ClassStandingsResponse::from(standings)).expect("serialises");
        assert_eq!(value["peerDataAvailable"], true);
        assert_eq!(
            value["standings"],
            json!([
                { "rollNo": "2", "name": "B", "cgpa": 66.67 },
                { "rollNo": "1", "name": "A", "cgpa": 0.0 }
            ])
        );
    }
}
