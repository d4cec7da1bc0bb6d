//! 8-bit RGB image storage and file output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised while writing or addressing an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to write image: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Row-major RGB image, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

/// Map a 0-255 float channel to a byte, clamping out-of-range values.
#[inline]
fn to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Set the pixel at (x, y) from channels in 0-255.
    pub fn set_pixel(&mut self, x: u32, y: u32, r: f32, g: f32, b: f32) -> Result<(), ImageError> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = [to_byte(r), to_byte(g), to_byte(b)];
        Ok(())
    }

    /// Get the pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.index(x, y).ok().map(|idx| self.pixels[idx])
    }

    /// Write the image as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for [r, g, b] in &self.pixels {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        writer.flush()
    }

    /// Save to `path`. `.ppm` is written directly; other extensions go through
    /// the `image` crate, which picks the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            let width = self.width as usize;
            let rgb = image::RgbImage::from_fn(self.width, self.height, |x, y| {
                image::Rgb(self.pixels[y as usize * width + x as usize])
            });
            rgb.save(path)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let image = ImageBuffer::new(4, 3);
        assert_eq!(image.pixels().len(), 12);
        assert!(image.pixels().iter().all(|p| *p == [0, 0, 0]));
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut image = ImageBuffer::new(4, 3);
        image.set_pixel(3, 2, 255.0, 128.4, 0.0).unwrap();

        assert_eq!(image.get_pixel(3, 2), Some([255, 128, 0]));
        assert_eq!(image.get_pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(image.get_pixel(4, 0), None);
    }

    #[test]
    fn test_set_pixel_clamps() {
        let mut image = ImageBuffer::new(1, 1);
        image.set_pixel(0, 0, 300.0, -20.0, 255.99).unwrap();
        assert_eq!(image.get_pixel(0, 0), Some([255, 0, 255]));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut image = ImageBuffer::new(2, 2);
        let err = image.set_pixel(2, 0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ImageError::OutOfBounds { x: 2, y: 0, .. }));
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 1);
        image.set_pixel(0, 0, 255.0, 0.0, 0.0).unwrap();
        image.set_pixel(1, 0, 0.0, 0.0, 255.0).unwrap();

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "P3\n2 1\n255\n255 0 0\n0 0 255\n");
    }

    #[test]
    fn test_save_png_and_ppm() {
        let mut image = ImageBuffer::new(3, 2);
        image.set_pixel(1, 1, 10.0, 20.0, 30.0).unwrap();

        let dir = std::env::temp_dir().join(format!("prism_image_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ppm = dir.join("out.ppm");
        image.save(&ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n3 2\n255\n"));

        let png = dir.join("out.png");
        image.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
