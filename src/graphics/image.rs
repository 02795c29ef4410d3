//! Raster images embedded as PDF XObjects.
//!
//! Two sources matter here: the institutional logo (JPEG, passed through
//! untouched with DCTDecode) and the validation QR bitmap (raw 8-bit
//! grayscale produced in-process).

use crate::error::{RenderError, Result};
use crate::objects::{Dictionary, Object};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// An image that can be embedded in a page.
#[derive(Debug, Clone)]
pub struct Image {
    data: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    color_space: ImageColorSpace,
    bits_per_component: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFormat {
    /// JPEG data, embedded as-is with a DCTDecode filter
    Jpeg,
    /// Uncompressed samples, row-major
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageColorSpace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
}

impl Image {
    /// Loads a JPEG image from a file.
    pub fn from_jpeg_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_jpeg_data(data)
    }

    /// Creates an image from in-memory JPEG data.
    pub fn from_jpeg_data(data: Vec<u8>) -> Result<Self> {
        let (width, height, color_space, bits_per_component) = parse_jpeg_header(&data)?;

        Ok(Image {
            data,
            format: ImageFormat::Jpeg,
            width,
            height,
            color_space,
            bits_per_component,
        })
    }

    /// Creates an image from raw 8-bit grayscale samples, one byte per
    /// pixel, row-major. Used for the QR validation stamp.
    pub fn from_gray8(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(RenderError::InvalidImage(format!(
                "expected {} gray samples, got {}",
                width as usize * height as usize,
                data.len()
            )));
        }

        Ok(Image {
            data,
            format: ImageFormat::Raw,
            width,
            height,
            color_space: ImageColorSpace::DeviceGray,
            bits_per_component: 8,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Converts to an image XObject stream.
    pub fn to_pdf_object(&self) -> Object {
        let mut dict = Dictionary::new();

        dict.set("Type", Object::Name("XObject".to_string()));
        dict.set("Subtype", Object::Name("Image".to_string()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));

        let color_space_name = match self.color_space {
            ImageColorSpace::DeviceGray => "DeviceGray",
            ImageColorSpace::DeviceRGB => "DeviceRGB",
            ImageColorSpace::DeviceCMYK => "DeviceCMYK",
        };
        dict.set("ColorSpace", Object::Name(color_space_name.to_string()));
        dict.set(
            "BitsPerComponent",
            Object::Integer(self.bits_per_component as i64),
        );

        if self.format == ImageFormat::Jpeg {
            dict.set("Filter", Object::Name("DCTDecode".to_string()));
        }

        Object::Stream(dict, self.data.clone())
    }
}

/// Parses a JPEG header for dimensions and component count.
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ImageColorSpace, u8)> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(RenderError::InvalidImage(
            "Not a valid JPEG file".to_string(),
        ));
    }

    let mut pos = 2;
    let mut width = 0;
    let mut height = 0;
    let mut components = 0;

    while pos < data.len() - 1 {
        if data[pos] != 0xFF {
            return Err(RenderError::InvalidImage(
                "Invalid JPEG marker".to_string(),
            ));
        }

        let marker = data[pos + 1];
        pos += 2;

        if marker == 0xFF {
            continue;
        }

        // SOF markers carry the frame dimensions
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            if pos + 7 >= data.len() {
                return Err(RenderError::InvalidImage(
                    "Truncated JPEG file".to_string(),
                ));
            }

            pos += 2; // segment length
            pos += 1; // precision

            height = ((data[pos] as u32) << 8) | (data[pos + 1] as u32);
            pos += 2;
            width = ((data[pos] as u32) << 8) | (data[pos + 1] as u32);
            pos += 2;

            components = data[pos];
            break;
        } else if marker == 0xD9 {
            break;
        } else if marker == 0xD8 || (0xD0..=0xD7).contains(&marker) {
            continue;
        } else {
            if pos + 1 >= data.len() {
                return Err(RenderError::InvalidImage(
                    "Truncated JPEG file".to_string(),
                ));
            }
            let length = ((data[pos] as usize) << 8) | (data[pos + 1] as usize);
            pos += length;
        }
    }

    if width == 0 || height == 0 {
        return Err(RenderError::InvalidImage(
            "Could not find image dimensions".to_string(),
        ));
    }

    let color_space = match components {
        1 => ImageColorSpace::DeviceGray,
        3 => ImageColorSpace::DeviceRGB,
        4 => ImageColorSpace::DeviceCMYK,
        _ => {
            return Err(RenderError::InvalidImage(format!(
                "Unsupported number of components: {components}"
            )))
        }
    };

    Ok((width, height, color_space, 8))
}
