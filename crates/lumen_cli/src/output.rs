//! Image file output.

use anyhow::{Context, Result};
use lumen_renderer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save the framebuffer, choosing the format from the file extension.
///
/// `.ppm` files are written as plain-text P3; anything else goes through
/// the `image` crate.
pub fn save(image: &Framebuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .context("framebuffer size does not match its dimensions")?;
        buffer
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

/// Write a plain-text P3 PPM, one pixel per line.
pub fn write_ppm(image: &Framebuffer, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Color;

    fn tiny() -> Framebuffer {
        let mut image = Framebuffer::new(2, 1);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, -1.0));
        image
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&tiny(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 0\n");
    }

    #[test]
    fn test_save_png_and_ppm() {
        let dir = std::env::temp_dir();
        let id = std::process::id();

        let png = dir.join(format!("lumen-{id}-out.png"));
        save(&tiny(), &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        std::fs::remove_file(&png).ok();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(1, 0).0, [128, 0, 0]);

        let ppm = dir.join(format!("lumen-{id}-out.PPM"));
        save(&tiny(), &ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        std::fs::remove_file(&ppm).ok();
        assert!(text.starts_with("P3\n2 1\n255\n"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let path = std::env::temp_dir().join("lumen-no-such-dir").join("out.ppm");
        assert!(save(&tiny(), &path).is_err());
    }
}
