//! Academic transcript model and rendering.

mod assembler;
mod classify;
mod stamp;

pub use assembler::TranscriptRenderer;
pub use classify::{Situacao, Titulacao};
pub use stamp::{CodeEncoder, QrEncoder, ValidationStamp};

use chrono::NaiveDate;

/// Placeholder rendered when an optional value is absent.
pub const EMPTY_FIELD: &str = "—";

/// The issuing institution's identity block.
#[derive(Debug, Clone)]
pub struct Institution {
    pub name: String,
    pub subtitle: String,
    /// Accreditation and legal-compliance lines printed under the name.
    pub compliance: [String; 3],
}

/// Personal and enrollment data of the student.
#[derive(Debug, Clone, Default)]
pub struct StudentIdentity {
    pub name: String,
    pub cpf: String,
    pub matricula: String,
    pub rg: String,
    pub rg_issuer: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: String,
    pub admission_date: Option<NaiveDate>,
}

/// The course the transcript certifies.
#[derive(Debug, Clone, Default)]
pub struct CourseInfo {
    pub name: String,
    pub area: String,
    pub modality: String,
    /// Academic period covered, e.g. "2019/1 a 2022/2".
    pub period: String,
}

/// Milestone dates shown in the three-column date grid.
#[derive(Debug, Clone, Default)]
pub struct CompletionDates {
    pub conclusion: Option<NaiveDate>,
    pub graduation_ceremony: Option<NaiveDate>,
    pub diploma_issue: Option<NaiveDate>,
}

/// One completed subject with its outcome.
#[derive(Debug, Clone)]
pub struct SubjectResult {
    pub name: String,
    pub workload_hours: u32,
    pub grade: f64,
    pub teacher: String,
    /// Free-text academic title of the teacher, e.g. "Doutor em Física".
    pub qualification: String,
}

/// Everything needed to render one transcript document.
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub institution: Institution,
    pub student: StudentIdentity,
    pub course: CourseInfo,
    pub subjects: Vec<SubjectResult>,
    pub dates: CompletionDates,
}

impl TranscriptRecord {
    /// Sum of the workload hours of all completed subjects.
    pub fn completed_hours(&self) -> u32 {
        self.subjects.iter().map(|s| s.workload_hours).sum()
    }
}

/// Formats a date as dd/mm/yyyy, or the placeholder when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => EMPTY_FIELD.to_string(),
    }
}
