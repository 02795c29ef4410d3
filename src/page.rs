use crate::error::{RenderError, Result};
use crate::graphics::{GraphicsContext, Image};
use crate::text::TextContext;
use std::collections::HashMap;

/// A single fixed-size page: the transcript renderer's drawing surface.
///
/// Pages carry graphics and text contexts plus any named images, and are
/// immutable once the document moves on to the next page. Coordinates are
/// PDF-native (points, origin at the bottom-left corner).
#[derive(Clone)]
pub struct Page {
    width: f64,
    height: f64,
    graphics_context: GraphicsContext,
    text_context: TextContext,
    images: HashMap<String, Image>,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            graphics_context: GraphicsContext::new(),
            text_context: TextContext::new(),
            images: HashMap::new(),
        }
    }

    /// Creates a new A4 portrait page (595 x 842 points), the fixed page
    /// size for transcript documents.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Mutable access to the shape-drawing context.
    pub fn graphics(&mut self) -> &mut GraphicsContext {
        &mut self.graphics_context
    }

    /// Mutable access to the text-drawing context.
    pub fn text(&mut self) -> &mut TextContext {
        &mut self.text_context
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Registers an image under a resource name for later placement.
    pub fn add_image(&mut self, name: impl Into<String>, image: Image) {
        self.images.insert(name.into(), image);
    }

    /// Places a previously registered image with its lower-left corner at
    /// (x, y), scaled to `width` x `height` points.
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if self.images.contains_key(name) {
            self.graphics_context.draw_image(name, x, y, width, height);
            Ok(())
        } else {
            Err(RenderError::InvalidReference(format!(
                "Image '{name}' not found"
            )))
        }
    }

    /// The graphics operators emitted so far. Exposed for assertions on
    /// rendered output.
    pub fn graphics_operations(&self) -> &str {
        self.graphics_context.operations()
    }

    /// The text operators emitted so far. Exposed for assertions on
    /// rendered output.
    pub fn text_operations(&self) -> &str {
        self.text_context.operations()
    }

    pub(crate) fn images(&self) -> &HashMap<String, Image> {
        &self.images
    }

    pub(crate) fn generate_content(&self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.graphics_context.generate_operations()?);
        content.extend_from_slice(&self.text_context.generate_operations()?);
        Ok(content)
    }
}
