mod color;
mod image;

pub use color::Color;
pub use image::{Image, ImageColorSpace, ImageFormat};

use crate::error::Result;

/// Collects the path and image operators for one page's content stream.
///
/// Purely append-only: drawing outside the page bounds is legal and simply
/// clipped by the viewer.
#[derive(Clone)]
pub struct GraphicsContext {
    operations: String,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
}

impl Default for GraphicsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.operations.push_str(&format!("{x:.2} {y:.2} m\n"));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.operations.push_str(&format!("{x:.2} {y:.2} l\n"));
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.operations
            .push_str(&format!("{x:.2} {y:.2} {width:.2} {height:.2} re\n"));
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.apply_stroke_color();
        self.operations.push_str("S\n");
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.apply_fill_color();
        self.operations.push_str("f\n");
        self
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.apply_fill_color();
        self.apply_stroke_color();
        self.operations.push_str("B\n");
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.fill_color = color;
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stroke_color = color;
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.line_width = width;
        self.operations.push_str(&format!("{width:.2} w\n"));
        self
    }

    /// Convenience for a single straight segment.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.operations.push_str("q\n");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.operations.push_str("Q\n");
        self
    }

    /// Places a named image XObject with its lower-left corner at (x, y).
    pub fn draw_image(
        &mut self,
        image_name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.save_state();
        self.operations
            .push_str(&format!("{width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm\n"));
        self.operations.push_str(&format!("/{image_name} Do\n"));
        self.restore_state();
        self
    }

    fn apply_stroke_color(&mut self) {
        match self.stroke_color {
            Color::Rgb(r, g, b) => {
                self.operations
                    .push_str(&format!("{r:.3} {g:.3} {b:.3} RG\n"));
            }
            Color::Gray(g) => {
                self.operations.push_str(&format!("{g:.3} G\n"));
            }
        }
    }

    fn apply_fill_color(&mut self) {
        match self.fill_color {
            Color::Rgb(r, g, b) => {
                self.operations
                    .push_str(&format!("{r:.3} {g:.3} {b:.3} rg\n"));
            }
            Color::Gray(g) => {
                self.operations.push_str(&format!("{g:.3} g\n"));
            }
        }
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }

    pub(crate) fn generate_operations(&self) -> Result<Vec<u8>> {
        Ok(self.operations.as_bytes().to_vec())
    }
}
