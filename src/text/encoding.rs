//! WinAnsi (CP1252) text encoding for content-stream strings.
//!
//! The standard fonts are declared with WinAnsiEncoding, which covers the
//! accented characters of Portuguese header text. Table cells never rely on
//! this: they are diacritic-stripped before drawing.

/// Encodes a UTF-8 string as Windows-1252 bytes. Unmapped characters become
/// a question mark rather than failing the render.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch as u32 {
            // ASCII range
            0x00..=0x7F => result.push(ch as u8),
            // Latin-1 Supplement overlaps with Windows-1252
            0xA0..=0xFF => result.push(ch as u8),
            // Windows-1252 specials
            0x20AC => result.push(0x80), // Euro sign
            0x2026 => result.push(0x85), // Horizontal ellipsis
            0x2018 => result.push(0x91), // Left single quotation mark
            0x2019 => result.push(0x92), // Right single quotation mark
            0x201C => result.push(0x93), // Left double quotation mark
            0x201D => result.push(0x94), // Right double quotation mark
            0x2022 => result.push(0x95), // Bullet
            0x2013 => result.push(0x96), // En dash
            0x2014 => result.push(0x97), // Em dash
            0x2122 => result.push(0x99), // Trade mark sign
            _ => result.push(b'?'),
        }
    }
    result
}
