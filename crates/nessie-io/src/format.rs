//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header,
//! or by file extension when writing.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// Binary PGM
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// Supported image file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Binary portable graymap (P5)
    Pgm,
}

impl ImageFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pgm => "pgm",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "pgm" | "pnm" => Some(Self::Pgm),
            _ => None,
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.starts_with(magic::PNG) {
        Ok(ImageFormat::Png)
    } else if data.starts_with(magic::PGM_BINARY) {
        Ok(ImageFormat::Pgm)
    } else {
        Err(IoError::UnsupportedFormat(
            "unrecognized image header".to_string(),
        ))
    }
}
