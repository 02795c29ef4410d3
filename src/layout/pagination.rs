//! Page-break control with orphan avoidance.

use crate::document::Document;
use crate::error::Result;
use crate::layout::{
    draw_section_title, Row, TableLayout, BOTTOM_MARGIN, HEADER_ROW_HEIGHT, MARGIN_TOP, ROW_HEIGHT,
};
use crate::page::Page;
use crate::text::{measure_text, Font};
use tracing::debug;

/// Rows that must fit below a freshly drawn table header before the
/// header is allowed onto the current page.
const LOOK_AHEAD_ROWS: f64 = 3.0;

/// Decides whether the next element of height `needed` forces a page
/// break. Single rows break only when they do not fit; taller elements
/// (headers, blocks) additionally break when fewer than three rows of
/// space would remain under them.
pub fn should_break(remaining: f64, needed: f64, row_height: f64) -> bool {
    if remaining < needed {
        return true;
    }
    needed > row_height && remaining - needed < LOOK_AHEAD_ROWS * row_height
}

/// Tracks the vertical cursor across pages and re-draws the continuation
/// header and table header after every break.
pub struct PaginationController {
    document: Document,
    page: Page,
    cursor_y: f64,
    table: TableLayout,
    institution: String,
    subtitle: String,
    page_number: u32,
    row_index: usize,
    in_table: bool,
}

impl PaginationController {
    pub fn new(
        table: TableLayout,
        institution: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        let page = Page::a4();
        let cursor_y = page.height() - MARGIN_TOP;
        Self {
            document: Document::new(),
            page,
            cursor_y,
            table,
            institution: institution.into(),
            subtitle: subtitle.into(),
            page_number: 1,
            row_index: 0,
            in_table: false,
        }
    }

    pub fn page(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn cursor(&self) -> f64 {
        self.cursor_y
    }

    pub fn set_cursor(&mut self, y: f64) {
        self.cursor_y = y;
    }

    pub fn advance(&mut self, amount: f64) {
        self.cursor_y -= amount;
    }

    /// Breaks to a new page if `needed` points of content would not fit
    /// above the bottom margin.
    pub fn ensure_space(&mut self, needed: f64) -> Result<()> {
        let remaining = self.cursor_y - BOTTOM_MARGIN;
        if should_break(remaining, needed, ROW_HEIGHT) {
            self.break_page()?;
        }
        Ok(())
    }

    /// Draws the table header, breaking first if fewer than three rows
    /// would fit under it. The header is re-drawn automatically after
    /// every subsequent break, so callers invoke this once.
    ///
    /// Only the literal header height is requested; `should_break`'s
    /// multi-row branch supplies the three-row reservation, so the
    /// break threshold is exactly one header plus three rows.
    pub fn draw_table_header(&mut self) -> Result<()> {
        self.ensure_space(HEADER_ROW_HEIGHT)?;
        self.in_table = true;
        self.cursor_y = self.table.draw_header(&mut self.page, self.cursor_y)?;
        Ok(())
    }

    /// Draws one table row, breaking to a new page first when needed.
    pub fn draw_row(&mut self, row: &Row) -> Result<()> {
        self.ensure_space(ROW_HEIGHT)?;
        self.cursor_y = self
            .table
            .draw_row(&mut self.page, self.cursor_y, row, self.row_index)?;
        self.row_index += 1;
        Ok(())
    }

    /// Marks the table as closed so later breaks stop re-drawing its
    /// header.
    pub fn end_table(&mut self) {
        self.in_table = false;
    }

    fn break_page(&mut self) -> Result<()> {
        debug!(page = self.page_number, cursor = self.cursor_y, "page break");

        self.draw_footer()?;
        let finished = std::mem::replace(&mut self.page, Page::a4());
        self.document.add_page(finished);
        self.page_number += 1;
        self.cursor_y = self.page.height() - MARGIN_TOP;

        // Continuation header so detached pages remain identifiable
        let institution = self.institution.clone();
        let subtitle = self.subtitle.clone();
        self.cursor_y = draw_section_title(&mut self.page, &institution, self.cursor_y, 10.0)?;
        if !subtitle.is_empty() {
            self.cursor_y = draw_section_title(&mut self.page, &subtitle, self.cursor_y, 8.0)?;
        }
        self.cursor_y -= 6.0;

        if self.in_table {
            self.cursor_y = self.table.draw_header(&mut self.page, self.cursor_y)?;
        }
        Ok(())
    }

    fn draw_footer(&mut self) -> Result<()> {
        let label = format!("Página {}", self.page_number);
        let width = measure_text(&label, Font::Helvetica, 8.0);
        let x = (self.page.width() - width) / 2.0;
        self.page
            .text()
            .set_font(Font::Helvetica, 8.0)
            .at(x, 30.0)
            .write(&label)?;
        Ok(())
    }

    /// Finishes the current page and returns the completed document.
    pub fn finish(mut self) -> Result<Document> {
        self.draw_footer()?;
        let page = std::mem::replace(&mut self.page, Page::a4());
        self.document.add_page(page);
        Ok(self.document)
    }
}
