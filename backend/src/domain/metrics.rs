//! Academic metrics: semester GPA, cumulative CGPA and peer standings.
//!
//! Everything here is pure and infallible. Degenerate input (no subjects,
//! no semesters, absent marks) degrades to zero instead of erroring, so
//! callers never need to guard before computing. Values are returned at full
//! precision on the raw 0-100 marks scale; [`round_for_display`] is applied
//! only at the presentation boundary.

use super::semester::{Semester, Subject};
use super::student::Student;

/// Mean of the raw marks of one semester.
///
/// Absent marks count as zero and still count as a subject. An empty
/// semester yields `0.0`.
///
/// # Examples
/// ```
/// use scorecard::domain::{metrics, Semester, Subject};
///
/// let semester = Semester::new(1, vec![
///     Subject::new("Maths", Some(90.0)).expect("valid"),
///     Subject::new("Physics", None).expect("valid"),
/// ]).expect("valid");
/// assert_eq!(metrics::semester_gpa(&semester), 45.0);
/// ```
#[must_use]
pub fn semester_gpa(semester: &Semester) -> f64 {
    mean(semester.subjects())
}

/// Cumulative mean over every subject of every semester.
///
/// This weighs semesters by their subject count; it is not the mean of the
/// per-semester GPAs.
#[must_use]
pub fn cgpa(student: &Student) -> f64 {
    mean(
        student
            .semesters()
            .iter()
            .flat_map(Semester::subjects),
    )
}

fn mean<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> f64 {
    let (total, count) = subjects
        .into_iter()
        .fold((0.0_f64, 0_u32), |(total, count), subject| {
            (total + subject.effective_marks(), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

/// One row of a class comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerStanding {
    /// Roll number of the peer.
    pub roll_no: String,
    /// Display name of the peer.
    pub name: String,
    /// Derived CGPA at full precision.
    pub cgpa: f64,
}

/// Project each peer to a standing, preserving input order and length.
///
/// No sorting and no exclusion is applied; presentation decides both.
#[must_use]
pub fn rank_peer_group(peers: &[Student]) -> Vec<PeerStanding> {
    peers
        .iter()
        .map(|peer| PeerStanding {
            roll_no: peer.roll_no().to_string(),
            name: peer.name().to_owned(),
            cgpa: cgpa(peer),
        })
        .collect()
}

/// Round half away from zero to two decimal places.
///
/// # Examples
/// ```
/// use scorecard::domain::metrics::round_for_display;
///
/// assert_eq!(round_for_display(100.0 / 3.0), 33.33);
/// assert_eq!(round_for_display(66.665_000_1), 66.67);
/// ```
#[must_use]
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Marks of one subject as plotted across a semester.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMarks {
    /// Subject name.
    pub name: String,
    /// Marks with absent values read as zero.
    pub marks: f64,
}

/// GPA and subject series for one semester.
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterGpa {
    /// Semester number.
    pub semester: u32,
    /// Raw mean of the semester's marks.
    pub gpa: f64,
    /// Per-subject marks in entry order.
    pub subjects: Vec<SubjectMarks>,
}

/// Per-semester marks series, in the order semesters were recorded.
#[must_use]
pub fn subject_marks_by_semester(student: &Student) -> Vec<Vec<SubjectMarks>> {
    student
        .semesters()
        .iter()
        .map(|semester| {
            semester
                .subjects()
                .iter()
                .map(|subject| SubjectMarks {
                    name: subject.name().to_owned(),
                    marks: subject.effective_marks(),
                })
                .collect()
        })
        .collect()
}

/// Everything the dashboard shows for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct AcademicSummary {
    /// One entry per recorded semester.
    pub semesters: Vec<SemesterGpa>,
    /// Derived CGPA.
    pub cgpa: f64,
}

impl AcademicSummary {
    /// Derive the summary from a student's semesters.
    #[must_use]
    pub fn for_student(student: &Student) -> Self {
        let semesters = student
            .semesters()
            .iter()
            .zip(subject_marks_by_semester(student))
            .map(|(semester, subjects)| SemesterGpa {
                semester: semester.number(),
                gpa: semester_gpa(semester),
                subjects,
            })
            .collect();
        Self {
            semesters,
            cgpa: cgpa(student),
        }
    }
}
