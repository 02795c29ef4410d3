//! # historico_pdf
//!
//! Native PDF generation for paginated academic transcripts (histórico
//! escolar). The crate builds PDF 1.7 documents directly, with no
//! external renderer: fixed A4 pages, Helvetica metrics for text
//! measurement, incremental table layout, and automatic page breaks
//! with orphan avoidance.
//!
//! ```no_run
//! use historico_pdf::transcript::{
//!     CompletionDates, CourseInfo, Institution, StudentIdentity, TranscriptRecord,
//!     TranscriptRenderer,
//! };
//!
//! # fn main() -> historico_pdf::Result<()> {
//! let record = TranscriptRecord {
//!     institution: Institution {
//!         name: "Faculdade Exemplo".into(),
//!         subtitle: "Ensino Superior".into(),
//!         compliance: Default::default(),
//!     },
//!     student: StudentIdentity::default(),
//!     course: CourseInfo::default(),
//!     subjects: vec![],
//!     dates: CompletionDates::default(),
//! };
//!
//! let renderer = TranscriptRenderer::new("https://exemplo.edu.br/validar");
//! let bytes = renderer.render(&record)?;
//! std::fs::write("historico.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod graphics;
pub mod layout;
pub mod objects;
pub mod page;
pub mod text;
pub mod transcript;
pub(crate) mod writer;

pub use document::Document;
pub use error::{RenderError, Result};
pub use page::Page;
pub use transcript::{TranscriptRecord, TranscriptRenderer};

/// Crate version, embedded in the PDF producer metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_empty_document_round_trip() {
        let mut doc = Document::new();
        doc.add_page(Page::a4());
        let mut buffer = Vec::new();
        doc.write(&mut buffer).unwrap();
        assert!(buffer.starts_with(b"%PDF-1.7"));
    }
}
