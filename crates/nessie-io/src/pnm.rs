//! PGM (portable graymap) format support
//!
//! Reads and writes binary P5 files with a maximum value up to 255.
//! Values below a smaller declared maximum are rescaled to 0..=255.

use crate::{IoError, IoResult};
use nessie_core::GrayImage;
use std::io::{Read, Write};

/// Read a binary PGM (P5) image.
pub fn read_pgm<R: Read>(mut reader: R) -> IoResult<GrayImage> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut pos = 0usize;
    let magic = next_token(&bytes, &mut pos)?;
    if magic != b"P5" {
        return Err(IoError::UnsupportedFormat(format!(
            "not a binary PGM: {:?}",
            String::from_utf8_lossy(magic)
        )));
    }
    let width = parse_number(next_token(&bytes, &mut pos)?)?;
    let height = parse_number(next_token(&bytes, &mut pos)?)?;
    let maxval = parse_number(next_token(&bytes, &mut pos)?)?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PGM maxval {} not supported",
            maxval
        )));
    }

    // Exactly one whitespace byte separates the header from the raster
    pos += 1;
    let expected = width as usize * height as usize;
    let raster = bytes
        .get(pos..pos + expected)
        .ok_or_else(|| IoError::InvalidData("truncated PGM raster".to_string()))?;

    let data = if maxval == 255 {
        raster.to_vec()
    } else {
        raster
            .iter()
            .map(|&v| ((v.min(maxval as u8) as u32 * 255 + maxval / 2) / maxval) as u8)
            .collect()
    };

    Ok(GrayImage::new(width, height, data)?)
}

/// Write an image as binary PGM (P5).
pub fn write_pgm<W: Write>(image: &GrayImage, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", image.width(), image.height())?;
    writer.write_all(image.data())?;
    Ok(())
}

fn next_token<'a>(bytes: &'a [u8], pos: &mut usize) -> IoResult<&'a [u8]> {
    loop {
        while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < bytes.len() && bytes[*pos] == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }
    let start = *pos;
    while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    if start == *pos {
        return Err(IoError::InvalidData("truncated PGM header".to_string()));
    }
    Ok(&bytes[start..*pos])
}

fn parse_number(token: &[u8]) -> IoResult<u32> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "bad PGM header field: {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_comment_and_small_maxval() {
        let mut bytes = b"P5\n# scanner output\n2 1\n15\n".to_vec();
        bytes.extend_from_slice(&[0, 15]);
        let img = read_pgm(&bytes[..]).unwrap();
        assert_eq!(img.data(), &[0, 255]);
    }

    #[test]
    fn test_write_then_read() {
        let img = GrayImage::new(3, 2, vec![0, 10, 20, 30, 40, 250]).unwrap();
        let mut bytes = Vec::new();
        write_pgm(&img, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"P5\n3 2\n255\n"));
        assert_eq!(read_pgm(&bytes[..]).unwrap(), img);
    }

    #[test]
    fn test_truncated_raster() {
        let bytes = b"P5 4 4 255\n\x00\x00".to_vec();
        assert!(matches!(read_pgm(&bytes[..]), Err(IoError::InvalidData(_))));
    }
}
