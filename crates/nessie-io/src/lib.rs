//! nessie-io - Image I/O for press clips
//!
//! Decodes source images into [`GrayImage`] and serializes [`Clip`]
//! contents back to disk for visual inspection. Supported formats:
//!
//! - **PNG** (feature `png-format`, default) - any color type, converted
//!   to 8-bit luminance on read
//! - **PGM** (feature `pnm`, default) - binary P5
//!
//! # Example
//!
//! ```no_run
//! use nessie_io::{ImageFormat, read_image, write_clip};
//! use nessie_core::Clip;
//!
//! let image = read_image("clip.png").unwrap();
//! let clip = Clip::new(&image, 0, 0, image.height(), image.width()).unwrap();
//! write_clip(&clip, "/tmp/clip.pgm", ImageFormat::Pgm).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use nessie_core::{Clip, GrayImage};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image file as 8-bit grayscale.
///
/// The format is detected from the file header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pgm => pnm::read_pgm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write a grayscale image in the given format.
pub fn write_image<P: AsRef<Path>>(image: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pgm => pnm::write_pgm(image, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write the current contents of a press clip.
///
/// Binary clips are rendered black ink on white background.
pub fn write_clip<P: AsRef<Path>>(clip: &Clip, path: P, format: ImageFormat) -> IoResult<()> {
    let image = clip.to_gray_image()?;
    write_image(&image, path, format)
}
