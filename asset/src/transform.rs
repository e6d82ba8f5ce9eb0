use std::path::Path;

use image::{imageops::FilterType, DynamicImage, ImageFormat, ImageReader};
use lb_error::{Error, Result};
use tokio::{fs, task};

pub const TARGET_WIDTH: u32 = 450;
pub const TARGET_HEIGHT: u32 = 350;

/// Scales `src` to cover a 450x350 box, crops the centered window into `dest`
/// and deletes `src` once the destination is written.
pub async fn cover_crop(src: &Path, dest: &Path) -> Result<()> {
    let (src_buf, dest_buf) = (src.to_path_buf(), dest.to_path_buf());
    task::spawn_blocking(move || crop_file(&src_buf, &dest_buf))
        .await
        .map_err(|err| Error::Internal(format!("Image worker failed: {err}")))??;

    if let Err(err) = fs::remove_file(src).await {
        lb_log::warn(
            None,
            format!(
                "[ImageTransform] Failed to remove scratch file {}: {err}",
                src.display()
            ),
        );
    }

    lb_log::debug(
        Some("✂️"),
        format!("[ImageTransform] Cropped into {}", dest.display()),
    );

    Ok(())
}

fn crop_file(src: &Path, dest: &Path) -> Result<()> {
    let reader = ImageReader::open(src)
        .map_err(processing)?
        .with_guessed_format()
        .map_err(processing)?;
    let source_format = reader.format();
    let image = reader.decode().map_err(processing)?;

    // The destination extension wins; names without a known one keep the
    // codec of the source.
    let format = match ImageFormat::from_path(dest).ok().or(source_format) {
        Some(format) => format,
        None => return Err(Error::Processing("unknown output format".to_owned())),
    };

    let cropped = crop(&image);
    // Only PNG and TIFF encode 16-bit samples; JPEG has no alpha either.
    let cropped = match format {
        ImageFormat::Png | ImageFormat::Tiff => cropped,
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(cropped.to_rgb8()),
        _ => DynamicImage::ImageRgba8(cropped.to_rgba8()),
    };

    cropped.save_with_format(dest, format).map_err(processing)
}

pub fn crop(image: &DynamicImage) -> DynamicImage {
    image.resize_to_fill(TARGET_WIDTH, TARGET_HEIGHT, FilterType::Lanczos3)
}

fn processing<E: std::fmt::Display>(err: E) -> Error {
    Error::Processing(err.to_string())
}
