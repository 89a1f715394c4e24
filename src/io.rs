use image::codecs::bmp::BmpEncoder;
use image::codecs::tga::TgaEncoder;
use image::codecs::tiff::TiffEncoder;
use image::RgbaImage;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::error::GlassError;

/// Lossless containers a displacement map can be written to.
/// Lossy formats are deliberately absent: channel values are data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MapFormat {
    #[default]
    Png,
    Bmp,
    Tga,
    Tiff,
    /// Bare RGBA8 bytes, row-major, no header.
    Raw,
}

impl MapFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            MapFormat::Png => "png",
            MapFormat::Bmp => "bmp",
            MapFormat::Tga => "tga",
            MapFormat::Tiff => "tiff",
            MapFormat::Raw => "rgba",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapFormat::Raw => "raw",
            other => other.extension(),
        }
    }

    /// Parse a format name (case-insensitive). Lossy names are rejected.
    pub fn parse(name: &str) -> Result<Self, GlassError> {
        match name.trim().to_lowercase().as_str() {
            "png" => Ok(MapFormat::Png),
            "bmp" => Ok(MapFormat::Bmp),
            "tga" => Ok(MapFormat::Tga),
            "tiff" | "tif" => Ok(MapFormat::Tiff),
            "raw" | "rgba" => Ok(MapFormat::Raw),
            lossy @ ("jpg" | "jpeg" | "webp" | "gif" | "avif") => Err(GlassError::UnsupportedFormat(
                format!("{} is lossy or palettized and would corrupt displacement values", lossy),
            )),
            other => Err(GlassError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infer the format from a file extension. `None` when the path has none.
    pub fn from_path(path: &Path) -> Option<Result<Self, GlassError>> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(MapFormat::parse)
    }
}

/// Encode a map into an in-memory buffer.
pub fn encode(image: &RgbaImage, format: MapFormat) -> Result<Vec<u8>, GlassError> {
    let mut buf = Vec::new();
    match format {
        MapFormat::Png => encode_png(image, &mut buf)?,
        MapFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut buf);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        MapFormat::Tga => {
            let encoder = TgaEncoder::new(&mut buf);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        MapFormat::Tiff => {
            // TIFF needs Seek
            let mut cursor = Cursor::new(Vec::new());
            let encoder = TiffEncoder::new(&mut cursor);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
            buf = cursor.into_inner();
        }
        MapFormat::Raw => buf.extend_from_slice(image.as_raw()),
    }
    Ok(buf)
}

/// 8-bit RGBA PNG straight through the `png` crate.
fn encode_png<W: Write>(image: &RgbaImage, out: W) -> Result<(), GlassError> {
    let mut encoder = png::Encoder::new(out, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Encode and write a map to `path`.
pub fn write_map(image: &RgbaImage, path: &Path, format: MapFormat) -> Result<(), GlassError> {
    let bytes = encode(image, format)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::displacement::generate;

    fn map() -> RgbaImage {
        generate(48, 32, 8.0, 6.0).unwrap().unwrap()
    }

    #[test]
    fn test_png_is_lossless() {
        let img = map();
        let bytes = encode(&img, MapFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_tiff_is_lossless() {
        let img = map();
        let bytes = encode(&img, MapFormat::Tiff).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_bmp_is_lossless() {
        let img = map();
        let bytes = encode(&img, MapFormat::Bmp).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Bmp)
            .unwrap()
            .into_rgba8();
        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_tga_is_lossless() {
        let img = map();
        let bytes = encode(&img, MapFormat::Tga).unwrap();
        // TGA has no magic number, so name the format
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Tga)
            .unwrap()
            .into_rgba8();
        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_raw_is_the_pixel_buffer() {
        let img = map();
        let bytes = encode(&img, MapFormat::Raw).unwrap();
        assert_eq!(bytes.len(), 48 * 32 * 4);
        assert_eq!(bytes, img.as_raw().clone());
    }

    #[test]
    fn test_png_encoding_is_deterministic() {
        let a = encode(&map(), MapFormat::Png).unwrap();
        let b = encode(&map(), MapFormat::Png).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(MapFormat::parse("PNG").unwrap(), MapFormat::Png);
        assert_eq!(MapFormat::parse("tif").unwrap(), MapFormat::Tiff);
        assert_eq!(MapFormat::parse("raw").unwrap(), MapFormat::Raw);
        assert!(matches!(
            MapFormat::parse("jpeg"),
            Err(GlassError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            MapFormat::parse("xcf"),
            Err(GlassError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            MapFormat::from_path(Path::new("out/map.bmp")).unwrap().unwrap(),
            MapFormat::Bmp
        );
        assert!(MapFormat::from_path(Path::new("out/map")).is_none());
        assert!(MapFormat::from_path(Path::new("map.webp")).unwrap().is_err());
    }
}
