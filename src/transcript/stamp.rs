//! Document validation stamp: random code plus scannable QR image.

use crate::error::{RenderError, Result};
use crate::graphics::Image;
use image::Luma;
use qrcode::QrCode;
use rand::distributions::Alphanumeric;
use rand::Rng;

const CODE_LENGTH: usize = 10;

/// Turns arbitrary text into a grayscale image embeddable in a page.
///
/// A trait so rendering can swap in a failing or deterministic encoder
/// under test.
pub trait CodeEncoder {
    fn encode(&self, data: &str) -> Result<Image>;
}

/// QR code encoder producing an 8-bit grayscale module grid.
#[derive(Debug, Default)]
pub struct QrEncoder;

impl CodeEncoder for QrEncoder {
    fn encode(&self, data: &str) -> Result<Image> {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| RenderError::CodeImage(e.to_string()))?;
        let rendered = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(4, 4)
            .build();
        let (width, height) = rendered.dimensions();
        Image::from_gray8(rendered.into_raw(), width, height)
    }
}

/// A freshly issued validation code and the URL where the document can
/// be verified.
#[derive(Debug, Clone)]
pub struct ValidationStamp {
    pub code: String,
    pub verification_url: String,
}

impl ValidationStamp {
    pub fn generate(base_url: &str) -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();
        let verification_url = format!("{base_url}?codigo={code}");
        Self {
            code,
            verification_url,
        }
    }
}
