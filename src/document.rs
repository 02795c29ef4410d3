use crate::error::Result;
use crate::page::Page;
use crate::writer::PdfWriter;
use chrono::{DateTime, Utc};

/// An ordered sequence of finished pages plus document metadata.
///
/// All layout state lives in the pagination layer; the document itself only
/// accumulates pages and serializes them. A fresh document is created per
/// generation request, so concurrent renders never share state.
pub struct Document {
    pub(crate) pages: Vec<Page>,
    pub(crate) metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: Some("historico_pdf".to_string()),
            producer: Some(format!("historico_pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(Utc::now()),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
    }

    /// Serializes the document into `buffer` as a complete PDF byte
    /// stream. The only fatal failure path of a generation request.
    pub fn write(&self, buffer: &mut Vec<u8>) -> Result<()> {
        let mut writer = PdfWriter::new_with_writer(buffer);
        writer.write_document(self)?;
        Ok(())
    }

    /// Writes the document to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let mut writer = PdfWriter::new(path)?;
        writer.write_document(self)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
        assert!(doc.metadata.title.is_none());
        assert_eq!(doc.metadata.creator, Some("historico_pdf".to_string()));
        assert!(doc
            .metadata
            .producer
            .as_ref()
            .unwrap()
            .starts_with("historico_pdf"));
    }

    #[test]
    fn test_add_page() {
        let mut doc = Document::new();
        doc.add_page(Page::a4());
        doc.add_page(Page::a4());
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_metadata_setters() {
        let mut doc = Document::new();
        doc.set_title("Histórico Escolar");
        doc.set_author("Secretaria Acadêmica");
        doc.set_subject("Histórico de conclusão de curso");

        assert_eq!(doc.metadata.title, Some("Histórico Escolar".to_string()));
        assert_eq!(
            doc.metadata.author,
            Some("Secretaria Acadêmica".to_string())
        );
    }

    #[test]
    fn test_write_to_buffer() {
        let mut doc = Document::new();
        doc.set_title("Buffer Test");
        doc.add_page(Page::a4());

        let mut buffer = Vec::new();
        doc.write(&mut buffer).unwrap();

        assert!(!buffer.is_empty());
        assert!(buffer.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_empty_document_write() {
        let doc = Document::new();
        let mut buffer = Vec::new();
        doc.write(&mut buffer).unwrap();
        assert!(buffer.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_save_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("out.pdf");

        let mut doc = Document::new();
        doc.add_page(Page::a4());
        doc.save(&path).unwrap();

        let content = std::fs::read(&path).unwrap();
        assert!(content.starts_with(b"%PDF-1.7"));
        assert!(content.ends_with(b"%%EOF\n"));
    }
}
