//! Format selection, encoding and atomic file output

use std::fmt;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use super::{PlottersWriter, Writer};
use crate::plot::ExportOptions;
use crate::render::Figure;
use crate::{Result, SynthplotError};

/// Image formats the exporter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Pick a format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(SynthplotError::UnsupportedFormat(format!(
                "'.{}' (expected png, jpg, jpeg, bmp or svg)",
                other
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            SynthplotError::UnsupportedFormat(format!(
                "'{}' has no file extension",
                path.display()
            ))
        })?;
        Self::from_extension(ext)
    }

    pub fn is_raster(self) -> bool {
        !matches!(self, ImageFormat::Svg)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Svg => "svg",
        };
        write!(f, "{}", s)
    }
}

/// Encode an RGB8 buffer of `width` x `height` pixels
pub fn encode_raster(
    buf: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> Result<Vec<u8>> {
    let target = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
        ImageFormat::Svg => {
            return Err(SynthplotError::UnsupportedFormat(
                "svg is not a raster format".to_string(),
            ))
        }
    };
    let img = image::RgbImage::from_raw(width, height, buf).ok_or_else(|| {
        SynthplotError::RenderError(format!(
            "pixel buffer does not match {}x{} image",
            width, height
        ))
    })?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, target)
        .map_err(|e| SynthplotError::RenderError(format!("Failed to encode {}: {}", format, e)))?;
    Ok(out.into_inner())
}

/// Crop margins that match the background color, keeping `pad` pixels.
///
/// A buffer that is entirely background, or that does not hold exactly
/// `width` x `height` RGB pixels, is returned unchanged.
pub fn tight_crop(
    buf: Vec<u8>,
    width: u32,
    height: u32,
    background: [u8; 3],
    pad: u32,
) -> (Vec<u8>, u32, u32) {
    let view = image::ImageBuffer::<image::Rgb<u8>, &[u8]>::from_raw(width, height, &buf);
    let Some(img) = view else {
        return (buf, width, height);
    };

    let bounds = img
        .enumerate_pixels()
        .filter(|(_, _, px)| px.0 != background)
        .fold(None, |acc: Option<(u32, u32, u32, u32)>, (x, y, _)| {
            Some(match acc {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            })
        });
    let Some((x0, y0, x1, y1)) = bounds else {
        return (buf, width, height);
    };

    let (x0, y0) = (x0.saturating_sub(pad), y0.saturating_sub(pad));
    let x1 = x1.saturating_add(pad).min(width - 1);
    let y1 = y1.saturating_add(pad).min(height - 1);
    let (cw, ch) = (x1 - x0 + 1, y1 - y0 + 1);

    let cropped =
        image::RgbImage::from_fn(cw, ch, |x, y| *img.get_pixel(x0 + x, y0 + y));
    (cropped.into_raw(), cw, ch)
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// Either the destination holds the complete new content or it is left as
/// it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SynthplotError::IoError(e.error))?;
    Ok(())
}

/// Draw `figure`, encode it for the extension of `path` and write it.
pub fn export(figure: &Figure, path: &Path, options: &ExportOptions) -> Result<PathBuf> {
    let format = ImageFormat::from_path(path)?;
    let writer = PlottersWriter::new(format).with_options(options.clone());
    let bytes = writer.write(figure)?;
    write_atomic(path, &bytes)?;

    let (width, height) = figure.config.pixel_size();
    info!(
        path = %path.display(),
        format = %format,
        width,
        height,
        bytes = bytes.len(),
        "exported figure"
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.JPG")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("a.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("dir/a.bmp")).unwrap(), ImageFormat::Bmp);
        assert_eq!(ImageFormat::from_path(Path::new("a.svg")).unwrap(), ImageFormat::Svg);
        assert!(!ImageFormat::Svg.is_raster());
    }

    #[test]
    fn test_unknown_or_missing_extension_is_unsupported() {
        for name in ["a.tiff", "a.gif", "chart"] {
            let err = ImageFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, SynthplotError::UnsupportedFormat(_)), "{}", name);
        }
    }

    #[test]
    fn test_encode_png_signature() {
        let buf = vec![255u8; 4 * 3 * 3];
        let png = encode_raster(buf, 4, 3, ImageFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let bmp = encode_raster(vec![0u8; 4 * 3 * 3], 4, 3, ImageFormat::Bmp).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let err = encode_raster(vec![0u8; 5], 4, 3, ImageFormat::Png).unwrap_err();
        assert!(matches!(err, SynthplotError::RenderError(_)));
    }

    #[test]
    fn test_tight_crop_keeps_padding() {
        // 10x10 white with a black pixel at (4, 5)
        let (w, h) = (10u32, 10u32);
        let mut buf = vec![255u8; (w * h * 3) as usize];
        let i = ((5 * w + 4) * 3) as usize;
        buf[i..i + 3].copy_from_slice(&[0, 0, 0]);

        let (cropped, cw, ch) = tight_crop(buf, w, h, [255, 255, 255], 1);
        assert_eq!((cw, ch), (3, 3));
        assert_eq!(cropped.len(), 3 * 3 * 3);
        // Content pixel sits in the middle
        assert_eq!(&cropped[12..15], &[0, 0, 0]);
    }

    #[test]
    fn test_tight_crop_padding_clamps_to_image() {
        let (w, h) = (4u32, 4u32);
        let mut buf = vec![255u8; (w * h * 3) as usize];
        buf[0..3].copy_from_slice(&[10, 20, 30]);
        let (_, cw, ch) = tight_crop(buf, w, h, [255, 255, 255], 10);
        assert_eq!((cw, ch), (4, 4));
    }

    #[test]
    fn test_tight_crop_copies_content_rows() {
        // 6x4 white with a 2x2 block of distinct colors at (3, 1)
        let (w, h) = (6u32, 4u32);
        let mut buf = vec![255u8; (w * h * 3) as usize];
        let block: [(u32, u32, [u8; 3]); 4] = [
            (3, 1, [1, 2, 3]),
            (4, 1, [4, 5, 6]),
            (3, 2, [7, 8, 9]),
            (4, 2, [10, 11, 12]),
        ];
        for (x, y, px) in block {
            let i = ((y * w + x) * 3) as usize;
            buf[i..i + 3].copy_from_slice(&px);
        }

        let (cropped, cw, ch) = tight_crop(buf, w, h, [255, 255, 255], 0);
        assert_eq!((cw, ch), (2, 2));
        assert_eq!(cropped, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_tight_crop_mismatched_buffer_unchanged() {
        let buf = vec![0u8; 7];
        let (out, cw, ch) = tight_crop(buf.clone(), 4, 3, [255, 255, 255], 0);
        assert_eq!((out, cw, ch), (buf, 4, 3));
    }

    #[test]
    fn test_tight_crop_blank_image_unchanged() {
        let buf = vec![255u8; 2 * 2 * 3];
        let (out, cw, ch) = tight_crop(buf.clone(), 2, 2, [255, 255, 255], 0);
        assert_eq!((out, cw, ch), (buf, 2, 2));
    }

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.bin");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        // No temporary files left behind
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_atomic_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // Parent is a regular file, so the directory cannot be created
        let err = write_atomic(&blocker.join("out.png"), b"data").unwrap_err();
        assert!(matches!(err, SynthplotError::IoError(_)));
        assert_eq!(std::fs::read(&blocker).unwrap(), b"x");
    }
}
