//! Framed blocks and section titles.

use crate::error::Result;
use crate::graphics::Color;
use crate::page::Page;
use crate::text::Font;

const TITLE_BAR_HEIGHT: f64 = 14.0;
const PADDING: f64 = 4.0;

/// Draws a bordered box, optionally with a shaded title bar, and returns
/// the y coordinate of its bottom edge.
///
/// Header-style boxes get the darker fill used for title bars; body
/// boxes stay near-white. The caller fills the interior afterwards,
/// this only paints the frame.
pub fn draw_info_box(
    page: &mut Page,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    title: Option<&str>,
    header_style: bool,
) -> Result<f64> {
    let bottom = y - height;
    let fill = if header_style { 0.85 } else { 0.97 };

    page.graphics()
        .set_fill_color(Color::gray(fill))
        .rect(x, bottom, width, height)
        .fill()
        .set_stroke_color(Color::black())
        .set_line_width(0.5)
        .rect(x, bottom, width, height)
        .stroke();

    if let Some(title) = title {
        page.graphics()
            .set_fill_color(Color::gray(0.85))
            .rect(x, y - TITLE_BAR_HEIGHT, width, TITLE_BAR_HEIGHT)
            .fill()
            .set_stroke_color(Color::black())
            .set_line_width(0.5)
            .rect(x, y - TITLE_BAR_HEIGHT, width, TITLE_BAR_HEIGHT)
            .stroke();

        page.text()
            .set_font(Font::HelveticaBold, 8.0)
            .at(x + PADDING, y - TITLE_BAR_HEIGHT + PADDING)
            .write(title)?;
    }

    Ok(bottom)
}

/// Draws a horizontally centered bold title and returns the y coordinate
/// below it.
pub fn draw_section_title(page: &mut Page, text: &str, y: f64, size: f64) -> Result<f64> {
    let width = crate::text::measure_text(text, Font::HelveticaBold, size);
    let x = (page.width() - width) / 2.0;

    page.text()
        .set_font(Font::HelveticaBold, size)
        .at(x, y)
        .write(text)?;

    Ok(y - size - 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_box_returns_bottom_edge() {
        let mut page = Page::a4();
        let bottom = draw_info_box(&mut page, 40.0, 700.0, 515.0, 60.0, None, false).unwrap();
        assert_eq!(bottom, 640.0);
        assert!(page.graphics_operations().contains("re"));
    }

    #[test]
    fn test_info_box_title_bar() {
        let mut page = Page::a4();
        draw_info_box(&mut page, 40.0, 700.0, 515.0, 60.0, Some("DADOS DO ALUNO"), false).unwrap();
        assert!(page.text_operations().contains("(DADOS DO ALUNO) Tj"));
        assert!(page.text_operations().contains("/Helvetica-Bold"));
    }

    #[test]
    fn test_section_title_centered() {
        let mut page = Page::a4();
        let next_y = draw_section_title(&mut page, "HISTÓRICO ESCOLAR", 780.0, 12.0).unwrap();
        assert!(next_y < 780.0);
        let width = crate::text::measure_text("HISTÓRICO ESCOLAR", Font::HelveticaBold, 12.0);
        let expected_x = (595.0 - width) / 2.0;
        assert!(page
            .text_operations()
            .contains(&format!("{expected_x:.2}")));
    }
}
