//! Column-based tables with shaded headers and zebra-striped rows.

use crate::error::{RenderError, Result};
use crate::graphics::Color;
use crate::layout::{printable_width, HEADER_ROW_HEIGHT, MARGIN_LEFT, ROW_HEIGHT};
use crate::page::Page;
use crate::text::{fit_text, Font};
use std::collections::HashMap;

const CELL_PADDING: f64 = 2.0;
const BODY_FONT_SIZE: f64 = 8.0;

/// A table column definition. Cell text is truncated with an ellipsis to
/// the column width unless `truncate` is disabled.
#[derive(Debug, Clone)]
pub struct Column {
    key: &'static str,
    label: &'static str,
    width: f64,
    truncate: bool,
}

impl Column {
    pub fn new(key: &'static str, label: &'static str, width: f64) -> Self {
        Self {
            key,
            label,
            width,
            truncate: true,
        }
    }

    /// Lets cell text overflow into the trailing page margin instead of
    /// being shortened. Used for the last, narrow column.
    pub fn no_truncate(mut self) -> Self {
        self.truncate = false;
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

/// One table row: cell values keyed by column key.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<&'static str, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.cells.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Fixed-geometry table layout. Column widths are validated against the
/// printable width once, at construction.
#[derive(Debug, Clone)]
pub struct TableLayout {
    columns: Vec<Column>,
}

impl TableLayout {
    pub fn new(columns: Vec<Column>, page_width: f64) -> Result<Self> {
        let total: f64 = columns.iter().map(|c| c.width).sum();
        let available = printable_width(page_width);
        if total > available + 0.01 {
            return Err(RenderError::InvalidLayout(format!(
                "column widths {total:.1} exceed printable width {available:.1}"
            )));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Draws the shaded header row with column labels and dividers.
    /// Returns the y coordinate below the header.
    pub fn draw_header(&self, page: &mut Page, y: f64) -> Result<f64> {
        let bottom = y - HEADER_ROW_HEIGHT;
        let width = self.total_width();

        page.graphics()
            .set_fill_color(Color::gray(0.8))
            .rect(MARGIN_LEFT, bottom, width, HEADER_ROW_HEIGHT)
            .fill()
            .set_stroke_color(Color::black())
            .set_line_width(0.5)
            .rect(MARGIN_LEFT, bottom, width, HEADER_ROW_HEIGHT)
            .stroke();

        let mut x = MARGIN_LEFT;
        for column in &self.columns {
            page.text()
                .set_font(Font::HelveticaBold, BODY_FONT_SIZE)
                .at(x + CELL_PADDING, bottom + 5.0)
                .write(column.label)?;
            x += column.width;
            if x < MARGIN_LEFT + width - 0.01 {
                page.graphics().set_line_width(0.5).line(x, bottom, x, y);
            }
        }

        Ok(bottom)
    }

    /// Draws one body row, zebra-shading even rows, and returns the y
    /// coordinate below it. `index` counts rows across the whole table,
    /// not per page, so striping stays continuous over page breaks.
    pub fn draw_row(&self, page: &mut Page, y: f64, row: &Row, index: usize) -> Result<f64> {
        let bottom = y - ROW_HEIGHT;
        let width = self.total_width();

        if index % 2 == 0 {
            page.graphics()
                .set_fill_color(Color::gray(0.93))
                .rect(MARGIN_LEFT, bottom, width, ROW_HEIGHT)
                .fill();
        }

        page.graphics()
            .set_stroke_color(Color::black())
            .set_line_width(0.25)
            .line(MARGIN_LEFT, bottom, MARGIN_LEFT + width, bottom);

        let mut x = MARGIN_LEFT;
        for column in &self.columns {
            let raw = row.get(column.key);
            let text = if column.truncate {
                fit_text(raw, column.width - 2.0 * CELL_PADDING, Font::Helvetica, BODY_FONT_SIZE)
            } else {
                raw.to_string()
            };
            page.text()
                .set_font(Font::Helvetica, BODY_FONT_SIZE)
                .at(x + CELL_PADDING, bottom + 4.0)
                .write(&text)?;
            x += column.width;
        }

        page.graphics()
            .set_line_width(0.25)
            .line(MARGIN_LEFT, bottom, MARGIN_LEFT, y)
            .line(MARGIN_LEFT + width, bottom, MARGIN_LEFT + width, y);

        Ok(bottom)
    }
}
