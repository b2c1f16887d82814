//! Scannable token image rendering.
//!
//! The download URL is encoded into a QR matrix and rasterized to a PNG,
//! returned base64-encoded for embedding straight into the upload response.
//! Rendering happens after the object is durably stored; a failure here is a
//! server error on the upload request but never corrupts the stored object.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};

use qrdrop_core::AppError;

/// Pixels per QR module.
const MODULE_SCALE: u32 = 8;
/// Quiet-zone border, in modules, required by scanners.
const QUIET_ZONE: u32 = 4;

/// Render `url` as a base64-encoded PNG QR image.
pub fn render_png_base64(url: &str) -> Result<String, AppError> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let dim = (modules + 2 * QUIET_ZONE) * MODULE_SCALE;

    let mut img = GrayImage::from_pixel(dim, dim, Luma([255u8]));
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x0 = (i as u32 % modules + QUIET_ZONE) * MODULE_SCALE;
        let y0 = (i as u32 / modules + QUIET_ZONE) * MODULE_SCALE;
        for dy in 0..MODULE_SCALE {
            for dx in 0..MODULE_SCALE {
                img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
            }
        }
    }

    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("QR PNG encoding failed: {}", e)))?;

    Ok(STANDARD.encode(png.into_inner()))
}
