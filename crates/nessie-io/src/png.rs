//! PNG image format support
//!
//! Decoding normalizes every PNG flavour (palette, low bit depth, 16-bit,
//! alpha) to 8-bit samples and converts color to luminance. Encoding
//! always writes 8-bit grayscale.

use crate::{IoError, IoResult};
use nessie_core::GrayImage;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as 8-bit grayscale.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let spp = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output color type: {:?}",
                other
            )));
        }
    };

    let mut gray = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let px = &row[x * spp..x * spp + spp];
            let value = if spp >= 3 {
                // Standard luminance formula
                ((px[0] as u32 * 77 + px[1] as u32 * 150 + px[2] as u32 * 29) >> 8) as u8
            } else {
                px[0]
            };
            gray.push(value);
        }
    }

    Ok(GrayImage::new(width, height, gray)?)
}

/// Write an image as 8-bit grayscale PNG.
pub fn write_png<W: Write>(image: &GrayImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_gray_preserves_pixels() {
        let img = GrayImage::new(4, 3, (0..12).map(|v| v * 20).collect()).unwrap();
        let mut bytes = Vec::new();
        write_png(&img, &mut bytes).unwrap();
        let back = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_png_rgb_converted_to_luminance() {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[255, 255, 255, 0, 0, 0]).unwrap();
        }
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.get(0, 0), Some(255));
        assert_eq!(img.get(0, 1), Some(0));
    }
}
