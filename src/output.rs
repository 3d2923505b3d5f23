use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use failure::{format_err, Error};

// Dispatch on the output extension: .png goes through the image crate,
// anything else gets plain-text PPM.
pub fn write_image(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<(), Error> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => write_png(path, pixels, width, height),
        _ => write_ppm(path, pixels, width, height),
    }
}

pub fn write_ppm(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm_to(&mut writer, pixels, width, height)?;
    writer.flush()?;
    Ok(())
}

fn write_ppm_to<W: Write>(
    writer: &mut W,
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<(), Error> {
    write!(writer, "P3\n{} {}\n255\n", width, height)?;
    for px in pixels.chunks(3) {
        write!(writer, "{} {} {}\n", px[0], px[1], px[2])?;
    }
    Ok(())
}

pub fn write_png(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<(), Error> {
    image::save_buffer(
        path,
        pixels,
        width as u32,
        height as u32,
        image::ColorType::RGB(8),
    )
    .map_err(|e| format_err!("could not write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process;

    #[test]
    fn ppm_layout_is_exact() {
        // two pixels wide, one tall, written top row first
        let pixels = [255, 0, 0, 0, 255, 0];
        let mut out = Vec::new();
        write_ppm_to(&mut out, &pixels, 2, 1).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 0 0\n0 255 0\n"
        );
    }

    #[test]
    fn ppm_writes_to_disk() {
        let path = std::env::temp_dir().join(format!("sundog-ppm-{}.ppm", process::id()));
        let pixels = vec![9; 4 * 2 * 3];
        write_ppm(&path, &pixels, 4, 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("P3\n4 2\n255\n"));
        assert_eq!(contents.lines().count(), 3 + 4 * 2);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn png_output_is_decodable() {
        let path = std::env::temp_dir().join(format!("sundog-png-{}.png", process::id()));
        let pixels = vec![255, 0, 0, 0, 255, 0];
        // through the extension dispatch, not write_png directly
        write_image(&path, &pixels, 2, 1).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb();
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 1);
        // png is lossless, the bytes come back exactly
        assert_eq!(decoded.into_raw(), pixels);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("sundog-no-such-dir-{}", process::id()))
            .join("out.ppm");
        assert!(write_ppm(&path, &[0, 0, 0], 1, 1).is_err());
    }
}
