mod encoding;
mod font;
mod metrics;

pub use encoding::encode_win_ansi;
pub use font::Font;
pub use metrics::{fit_text, measure_text, normalize_text};

use crate::error::Result;

/// Collects the text operators for one page's content stream.
#[derive(Clone)]
pub struct TextContext {
    operations: String,
    current_font: Font,
    font_size: f64,
    position: (f64, f64),
}

impl Default for TextContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TextContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            current_font: Font::Helvetica,
            font_size: 12.0,
            position: (0.0, 0.0),
        }
    }

    pub fn set_font(&mut self, font: Font, size: f64) -> &mut Self {
        self.current_font = font;
        self.font_size = size;
        self
    }

    /// Sets the baseline origin of the next `write` call.
    pub fn at(&mut self, x: f64, y: f64) -> &mut Self {
        self.position = (x, y);
        self
    }

    pub fn write(&mut self, text: &str) -> Result<&mut Self> {
        self.operations.push_str("BT\n");

        self.operations.push_str(&format!(
            "/{} {} Tf\n",
            self.current_font.pdf_name(),
            self.font_size
        ));
        self.operations.push_str(&format!(
            "{:.2} {:.2} Td\n",
            self.position.0, self.position.1
        ));

        let encoded = encode_win_ansi(text);

        self.operations.push('(');
        for &byte in &encoded {
            match byte {
                b'(' => self.operations.push_str("\\("),
                b')' => self.operations.push_str("\\)"),
                b'\\' => self.operations.push_str("\\\\"),
                b'\n' => self.operations.push_str("\\n"),
                b'\r' => self.operations.push_str("\\r"),
                b'\t' => self.operations.push_str("\\t"),
                0x20..=0x7E => self.operations.push(byte as char),
                _ => self.operations.push_str(&format!("\\{byte:03o}")),
            }
        }
        self.operations.push_str(") Tj\n");

        self.operations.push_str("ET\n");

        Ok(self)
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }

    pub(crate) fn generate_operations(&self) -> Result<Vec<u8>> {
        Ok(self.operations.as_bytes().to_vec())
    }
}
