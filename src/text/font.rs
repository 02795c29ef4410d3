/// The standard Type 1 fonts used by the transcript layout.
///
/// All three faces are guaranteed to be available in every PDF reader, so
/// nothing needs to be embedded. The page size and fonts are fixed per
/// document type; there is no render-time substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica (body text, table cells)
    Helvetica,
    /// Helvetica Bold (titles, table header, emphasized values)
    HelveticaBold,
    /// Helvetica Oblique (small print, footers)
    HelveticaOblique,
}

impl Font {
    /// The BaseFont name used in the page resources.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    pub fn all() -> [Font; 3] {
        [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_names() {
        assert_eq!(Font::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(Font::HelveticaBold.pdf_name(), "Helvetica-Bold");
        assert_eq!(Font::HelveticaOblique.pdf_name(), "Helvetica-Oblique");
    }

    #[test]
    fn test_all_distinct() {
        let names: Vec<&str> = Font::all().iter().map(|f| f.pdf_name()).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }
}
