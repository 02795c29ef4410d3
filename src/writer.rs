//! Low-level PDF 1.7 serialization: objects, page tree, xref, trailer.

use crate::document::Document;
use crate::error::Result;
use crate::objects::{Dictionary, Object, ObjectId};
use crate::text::Font;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct PdfWriter<W: Write> {
    writer: W,
    xref_positions: HashMap<ObjectId, u64>,
    current_position: u64,
    next_image_id: u32,
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref_positions: HashMap::new(),
            current_position: 0,
            next_image_id: 0,
        }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        // Ids: catalog 1, pages 2, then one page/content pair per page.
        // The info dict and image XObjects are allocated past the page
        // objects so long documents never reuse an id.
        let after_pages = 3 + document.pages.len() as u32 * 2;
        let info_id = ObjectId::new(after_pages, 0);
        self.next_image_id = after_pages + 1;

        self.write_header()?;

        let catalog_id = self.write_catalog()?;
        let _pages_id = self.write_pages(document)?;
        self.write_info(info_id, document)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment so transports treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self) -> Result<ObjectId> {
        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name("Catalog".to_string()));
        catalog.set("Pages", Object::Reference(pages_id));

        self.write_object(catalog_id, Object::Dictionary(catalog))?;
        Ok(catalog_id)
    }

    fn write_pages(&mut self, document: &Document) -> Result<ObjectId> {
        let pages_id = ObjectId::new(2, 0);
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name("Pages".to_string()));
        pages_dict.set("Count", Object::Integer(document.pages.len() as i64));

        // Page and content objects are allocated in pairs from id 3
        let first_id = 3;
        let kids: Vec<Object> = (0..document.pages.len())
            .map(|i| Object::Reference(ObjectId::new(first_id + i as u32 * 2, 0)))
            .collect();
        pages_dict.set("Kids", Object::Array(kids));

        self.write_object(pages_id, Object::Dictionary(pages_dict))?;

        for (i, page) in document.pages.iter().enumerate() {
            let page_id = ObjectId::new(first_id + i as u32 * 2, 0);
            let content_id = ObjectId::new(first_id + i as u32 * 2 + 1, 0);

            self.write_page(page_id, pages_id, content_id, page)?;
            self.write_page_content(content_id, page)?;
        }

        Ok(pages_id)
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        parent_id: ObjectId,
        content_id: ObjectId,
        page: &crate::page::Page,
    ) -> Result<()> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name("Page".to_string()));
        page_dict.set("Parent", Object::Reference(parent_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width()),
                Object::Real(page.height()),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));

        let mut resources = Dictionary::new();
        let mut font_dict = Dictionary::new();

        for font in Font::all() {
            let mut font_entry = Dictionary::new();
            font_entry.set("Type", Object::Name("Font".to_string()));
            font_entry.set("Subtype", Object::Name("Type1".to_string()));
            font_entry.set("BaseFont", Object::Name(font.pdf_name().to_string()));
            font_entry.set("Encoding", Object::Name("WinAnsiEncoding".to_string()));
            font_dict.set(font.pdf_name(), Object::Dictionary(font_entry));
        }
        resources.set("Font", Object::Dictionary(font_dict));

        if !page.images().is_empty() {
            let mut xobject_dict = Dictionary::new();

            // Sorted so object numbering is deterministic
            let mut names: Vec<&String> = page.images().keys().collect();
            names.sort();

            for name in names {
                let image_id = ObjectId::new(self.next_image_id, 0);
                self.next_image_id += 1;

                self.write_object(image_id, page.images()[name].to_pdf_object())?;
                xobject_dict.set(name.as_str(), Object::Reference(image_id));
            }

            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        page_dict.set("Resources", Object::Dictionary(resources));

        self.write_object(page_id, Object::Dictionary(page_dict))?;
        Ok(())
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &crate::page::Page) -> Result<()> {
        let content = page.generate_content()?;

        let mut stream_dict = Dictionary::new();
        stream_dict.set("Length", Object::Integer(content.len() as i64));

        self.write_object(content_id, Object::Stream(stream_dict, content))?;
        Ok(())
    }

    fn write_info(&mut self, info_id: ObjectId, document: &Document) -> Result<()> {
        let mut info_dict = Dictionary::new();

        if let Some(ref title) = document.metadata.title {
            info_dict.set("Title", Object::String(title.clone()));
        }
        if let Some(ref author) = document.metadata.author {
            info_dict.set("Author", Object::String(author.clone()));
        }
        if let Some(ref subject) = document.metadata.subject {
            info_dict.set("Subject", Object::String(subject.clone()));
        }
        if let Some(ref creator) = document.metadata.creator {
            info_dict.set("Creator", Object::String(creator.clone()));
        }
        if let Some(ref producer) = document.metadata.producer {
            info_dict.set("Producer", Object::String(producer.clone()));
        }
        if let Some(creation_date) = document.metadata.creation_date {
            info_dict.set("CreationDate", Object::String(format_pdf_date(creation_date)));
        }

        self.write_object(info_id, Object::Dictionary(info_dict))
    }

    fn write_object(&mut self, id: ObjectId, object: Object) -> Result<()> {
        self.xref_positions.insert(id, self.current_position);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(&object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(
                format!("{f:.6}")
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .as_bytes(),
            )?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                for &byte in &crate::text::encode_win_ansi(s) {
                    match byte {
                        b'(' => self.write_bytes(b"\\(")?,
                        b')' => self.write_bytes(b"\\)")?,
                        b'\\' => self.write_bytes(b"\\\\")?,
                        _ => self.write_bytes(&[byte])?,
                    }
                }
                self.write_bytes(b")")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b"\n/")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b"\n>>")?;
            }
            Object::Stream(dict, data) => {
                self.write_object_value(&Object::Dictionary(dict.clone()))?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => {
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        self.write_bytes(b"xref\n")?;

        let mut entries: Vec<_> = self
            .xref_positions
            .iter()
            .map(|(id, pos)| (*id, *pos))
            .collect();
        entries.sort_by_key(|(id, _)| id.number());

        let max_obj_num = entries.iter().map(|(id, _)| id.number()).max().unwrap_or(0);

        // One subsection from 0 to max; gaps become free entries
        self.write_bytes(b"0 ")?;
        self.write_bytes((max_obj_num + 1).to_string().as_bytes())?;
        self.write_bytes(b"\n")?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        for obj_num in 1..=max_obj_num {
            if let Some((_, position)) = entries.iter().find(|(id, _)| id.number() == obj_num) {
                let entry = format!("{position:010} {:05} n \n", 0);
                self.write_bytes(entry.as_bytes())?;
            } else {
                self.write_bytes(b"0000000000 00000 f \n")?;
            }
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(|id| id.number())
            .max()
            .unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer((max_obj_num + 1) as i64));
        trailer.set("Root", Object::Reference(catalog_id));
        trailer.set("Info", Object::Reference(info_id));

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;

        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Formats a timestamp as a PDF date string (D:YYYYMMDDHHmmSS+00'00).
fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("{}+00'00", date.format("D:%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    #[test]
    fn test_write_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buffer.len(), 15);
        assert_eq!(buffer[10], 0xE2);
    }

    #[test]
    fn test_write_catalog() {
        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new_with_writer(&mut buffer);
            let catalog_id = writer.write_catalog().unwrap();
            assert_eq!(catalog_id.number(), 1);
        }

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("1 0 obj"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Pages 2 0 R"));
    }

    #[test]
    fn test_write_document_structure() {
        let mut document = Document::new();
        document.set_title("Histórico Escolar");
        document.add_page(Page::a4());
        document.add_page(Page::a4());

        let mut buffer = Vec::new();
        document.write(&mut buffer).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.starts_with("%PDF-1.7\n"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Count 2"));
        assert!(content.contains("/MediaBox"));
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
        assert!(content.contains("trailer"));
        assert!(content.contains("%%EOF"));
    }

    #[test]
    fn test_write_info_metadata() {
        let mut document = Document::new();
        document.set_title("Test Title");
        document.set_author("Test Author");

        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new_with_writer(&mut buffer);
            writer.write_info(ObjectId::new(5, 0), &document).unwrap();
        }

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("/Title (Test Title)"));
        assert!(content.contains("/Author (Test Author)"));
        assert!(content.contains("/Producer (historico_pdf v"));
        assert!(content.contains("/CreationDate"));
    }

    #[test]
    fn test_image_xobject_written() {
        let mut page = Page::a4();
        let image = crate::graphics::Image::from_gray8(vec![255u8; 4], 2, 2).unwrap();
        page.add_image("Qr", image);
        page.draw_image("Qr", 100.0, 100.0, 50.0, 50.0).unwrap();

        let mut document = Document::new();
        document.add_page(page);

        let mut buffer = Vec::new();
        document.write(&mut buffer).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("/Subtype /Image"));
        assert!(content.contains("/ColorSpace /DeviceGray"));
        // One page: ids 1-4 are catalog/pages/page/content, 5 is the
        // info dict, images start at 6
        assert!(content.contains("/Qr 6 0 R"));
    }

    #[test]
    fn test_long_documents_never_reuse_object_ids() {
        let mut document = Document::new();
        for _ in 0..60 {
            document.add_page(Page::a4());
        }

        let mut buffer = Vec::new();
        document.write(&mut buffer).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        let mut seen = std::collections::HashSet::new();
        for line in content.lines() {
            if let Some(id) = line.strip_suffix(" 0 obj") {
                assert!(seen.insert(id.to_string()), "object {id} written twice");
            }
        }
        // Catalog, pages, 60 page/content pairs, info
        assert_eq!(seen.len(), 123);
        assert!(seen.contains("123"));
    }

    #[test]
    fn test_format_pdf_date() {
        use chrono::TimeZone;
        let date = Utc.with_ymd_and_hms(2023, 12, 25, 15, 30, 45).unwrap();
        let formatted = format_pdf_date(date);
        assert_eq!(formatted, "D:20231225153045+00'00");
    }

    #[test]
    fn test_xref_gap_entries() {
        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new_with_writer(&mut buffer);
            writer.xref_positions.insert(ObjectId::new(1, 0), 15);
            writer.xref_positions.insert(ObjectId::new(3, 0), 90);
            writer.write_xref().unwrap();
        }

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("0 4"));
        assert!(content.contains("0000000015 00000 n "));
        // The gap at object 2 is a free entry
        assert!(content.contains("0000000000 00000 f "));
        assert!(content.contains("0000000090 00000 n "));
    }
}
