/// A fill or stroke color. The transcript layout only needs RGB and
/// grayscale; grays carry the header/zebra shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// RGB color with components from 0.0 to 1.0
    Rgb(f64, f64, f64),
    /// Grayscale from 0.0 (black) to 1.0 (white)
    Gray(f64),
}

impl Color {
    /// Creates an RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Creates a grayscale color with value clamped to 0.0-1.0.
    pub fn gray(value: f64) -> Self {
        Color::Gray(value.clamp(0.0, 1.0))
    }

    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    pub fn white() -> Self {
        Color::Gray(1.0)
    }
}
