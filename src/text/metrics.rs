//! Text measurement, diacritic normalization and ellipsis fitting.
//!
//! Widths come from the AFM tables for the standard fonts, in 1/1000 of the
//! font size. Everything here is pure: no drawing, no state.

use crate::text::Font;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const ELLIPSIS: &str = "...";

struct FontMetrics {
    widths: HashMap<char, u16>,
    default_width: u16,
}

impl FontMetrics {
    fn new(default_width: u16) -> Self {
        Self {
            widths: HashMap::new(),
            default_width,
        }
    }

    fn with_widths(mut self, widths: &[(char, u16)]) -> Self {
        for &(ch, width) in widths {
            self.widths.insert(ch, width);
        }
        self
    }

    fn char_width(&self, ch: char) -> u16 {
        self.widths.get(&ch).copied().unwrap_or(self.default_width)
    }
}

lazy_static::lazy_static! {
    static ref FONT_METRICS: HashMap<Font, FontMetrics> = {
        let mut metrics = HashMap::new();

        // Helvetica
        metrics.insert(Font::Helvetica, FontMetrics::new(556).with_widths(&[
            (' ', 278), ('!', 278), ('"', 355), ('#', 556), ('$', 556), ('%', 889),
            ('&', 667), ('\'', 191), ('(', 333), (')', 333), ('*', 389), ('+', 584),
            (',', 278), ('-', 333), ('.', 278), ('/', 278), ('0', 556), ('1', 556),
            ('2', 556), ('3', 556), ('4', 556), ('5', 556), ('6', 556), ('7', 556),
            ('8', 556), ('9', 556), (':', 278), (';', 278), ('<', 584), ('=', 584),
            ('>', 584), ('?', 556), ('@', 1015), ('A', 667), ('B', 667), ('C', 722),
            ('D', 722), ('E', 667), ('F', 611), ('G', 778), ('H', 722), ('I', 278),
            ('J', 500), ('K', 667), ('L', 556), ('M', 833), ('N', 722), ('O', 778),
            ('P', 667), ('Q', 778), ('R', 722), ('S', 667), ('T', 611), ('U', 722),
            ('V', 667), ('W', 944), ('X', 667), ('Y', 667), ('Z', 611), ('[', 278),
            ('\\', 278), (']', 278), ('^', 469), ('_', 556), ('`', 333), ('a', 556),
            ('b', 556), ('c', 500), ('d', 556), ('e', 556), ('f', 278), ('g', 556),
            ('h', 556), ('i', 222), ('j', 222), ('k', 500), ('l', 222), ('m', 833),
            ('n', 556), ('o', 556), ('p', 556), ('q', 556), ('r', 333), ('s', 500),
            ('t', 278), ('u', 556), ('v', 500), ('w', 722), ('x', 500), ('y', 500),
            ('z', 500), ('{', 334), ('|', 260), ('}', 334), ('~', 584),
        ]));

        // Helvetica Bold
        metrics.insert(Font::HelveticaBold, FontMetrics::new(611).with_widths(&[
            (' ', 278), ('!', 333), ('"', 474), ('#', 556), ('$', 556), ('%', 889),
            ('&', 722), ('\'', 238), ('(', 333), (')', 333), ('*', 389), ('+', 584),
            (',', 278), ('-', 333), ('.', 278), ('/', 278), ('0', 556), ('1', 556),
            ('2', 556), ('3', 556), ('4', 556), ('5', 556), ('6', 556), ('7', 556),
            ('8', 556), ('9', 556), (':', 333), (';', 333), ('<', 584), ('=', 584),
            ('>', 584), ('?', 611), ('@', 975), ('A', 722), ('B', 722), ('C', 722),
            ('D', 722), ('E', 667), ('F', 611), ('G', 778), ('H', 722), ('I', 278),
            ('J', 556), ('K', 722), ('L', 611), ('M', 833), ('N', 722), ('O', 778),
            ('P', 667), ('Q', 778), ('R', 722), ('S', 667), ('T', 611), ('U', 722),
            ('V', 667), ('W', 944), ('X', 667), ('Y', 667), ('Z', 611), ('[', 333),
            ('\\', 278), (']', 333), ('^', 584), ('_', 556), ('`', 333), ('a', 556),
            ('b', 611), ('c', 556), ('d', 611), ('e', 556), ('f', 333), ('g', 611),
            ('h', 611), ('i', 278), ('j', 278), ('k', 556), ('l', 278), ('m', 889),
            ('n', 611), ('o', 611), ('p', 611), ('q', 611), ('r', 389), ('s', 556),
            ('t', 333), ('u', 611), ('v', 556), ('w', 778), ('x', 556), ('y', 556),
            ('z', 500), ('{', 389), ('|', 280), ('}', 389), ('~', 584),
        ]));

        metrics
    };
}

/// Measures the rendered width of `text` in points.
pub fn measure_text(text: &str, font: Font, font_size: f64) -> f64 {
    let metrics = match font {
        // Oblique has the same metrics as the upright face
        Font::HelveticaOblique => &FONT_METRICS[&Font::Helvetica],
        _ => &FONT_METRICS[&font],
    };

    let width_units: u32 = text.chars().map(|ch| metrics.char_width(ch) as u32).sum();

    (width_units as f64 / 1000.0) * font_size
}

/// Strips diacritics from Latin characters (ã→a, ç→c, É→E), preserving
/// case. Characters without a decomposition pass through unchanged.
///
/// Applied to table cell values only: the standard fonts render accents
/// fine in the header blocks, but cell text goes through [`fit_text`],
/// whose width arithmetic assumes the base-character widths.
pub fn normalize_text(text: &str) -> String {
    text.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// Normalizes `text` and, if it is too wide for `max_width`, truncates it
/// from the end and appends `"..."` until the result fits. A string that
/// cannot fit at all degenerates to `"..."`.
///
/// This never introduces line breaks; cells are strictly single-line.
pub fn fit_text(text: &str, max_width: f64, font: Font, font_size: f64) -> String {
    let normalized = normalize_text(text);
    if measure_text(&normalized, font, font_size) <= max_width {
        return normalized;
    }

    let mut chars: Vec<char> = normalized.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        if measure_text(&candidate, font, font_size) <= max_width {
            return candidate;
        }
    }

    ELLIPSIS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_text_helvetica() {
        let width = measure_text("Hello", Font::Helvetica, 12.0);
        // H=722 e=556 l=222 l=222 o=556 -> 2278 units
        assert!((width - 27.336).abs() < 0.01);
    }

    #[test]
    fn test_measure_empty() {
        assert_eq!(measure_text("", Font::Helvetica, 12.0), 0.0);
    }

    #[test]
    fn test_measure_oblique_matches_upright() {
        let upright = measure_text("Documento", Font::Helvetica, 8.0);
        let oblique = measure_text("Documento", Font::HelveticaOblique, 8.0);
        assert_eq!(upright, oblique);
    }

    #[test]
    fn test_font_size_scaling() {
        let at_8 = measure_text("Nota", Font::Helvetica, 8.0);
        let at_16 = measure_text("Nota", Font::Helvetica, 16.0);
        assert!((at_16 - 2.0 * at_8).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_portuguese() {
        assert_eq!(normalize_text("Português"), "Portugues");
        assert_eq!(normalize_text("Matemática Aplicada"), "Matematica Aplicada");
        assert_eq!(normalize_text("ção"), "cao");
    }

    #[test]
    fn test_normalize_preserves_case() {
        assert_eq!(normalize_text("ÉÇÃO"), "ECAO");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_text("Calculus 101"), "Calculus 101");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_text("Introdução à Computação");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn test_fit_text_unchanged_when_fits() {
        let fitted = fit_text("Calculo I", 200.0, Font::Helvetica, 8.0);
        assert_eq!(fitted, "Calculo I");
    }

    #[test]
    fn test_fit_text_truncates_with_ellipsis() {
        let long = "Fundamentos de Engenharia de Software Orientada a Objetos";
        let fitted = fit_text(long, 80.0, Font::Helvetica, 8.0);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() < long.len());
        assert!(measure_text(&fitted, Font::Helvetica, 8.0) <= 80.0);
    }

    #[test]
    fn test_fit_text_normalizes_first() {
        let fitted = fit_text("Física", 100.0, Font::Helvetica, 8.0);
        assert_eq!(fitted, "Fisica");
    }

    #[test]
    fn test_fit_text_degenerate_width() {
        // Nothing fits; the result collapses to the bare ellipsis
        let fitted = fit_text("Qualquer disciplina", 1.0, Font::Helvetica, 8.0);
        assert_eq!(fitted, "...");
    }

    #[test]
    fn test_fit_text_idempotent() {
        let long = "Laboratorio de Circuitos Eletricos e Eletronicos Digitais";
        let once = fit_text(long, 70.0, Font::Helvetica, 8.0);
        let twice = fit_text(&once, 70.0, Font::Helvetica, 8.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fit_text_empty() {
        assert_eq!(fit_text("", 50.0, Font::Helvetica, 8.0), "");
    }
}
