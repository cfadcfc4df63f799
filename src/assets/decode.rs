use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GenericImageView, imageops::FilterType};

use crate::{
    foundation::{
        core::{CropGravity, Size},
        error::{CardError, CardResult},
    },
    render::surface::Surface,
};

/// Decode an encoded image (PNG, JPEG, WebP...).
pub fn decode_image(bytes: &[u8]) -> CardResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Read and decode an image file. A missing file is a [`CardError::MissingInput`].
pub fn load_image(path: &Path) -> CardResult<DynamicImage> {
    if !path.is_file() {
        return Err(CardError::missing_input(format!(
            "image '{}'",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| CardError::render(format!("'{}': {e}", path.display())))
}

/// Pixel size of a decoded image.
pub fn image_size(img: &DynamicImage) -> Size {
    let (width, height) = img.dimensions();
    Size::new(width, height)
}

/// Premultiplied surface at the image's own size.
pub fn image_to_surface(img: &DynamicImage) -> CardResult<Surface> {
    let rgba = img.to_rgba8();
    let size = Size::new(rgba.width(), rgba.height());
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Surface::from_premul(size, data)
}

/// Scale `img` to cover `target` and crop the overflow according to `gravity`.
///
/// Horizontal overflow is always cropped evenly from both sides. The result is premultiplied.
pub fn cover_resize(img: &DynamicImage, target: Size, gravity: CropGravity) -> CardResult<Surface> {
    let src = image_size(img);
    if src.is_empty() || target.is_empty() {
        return Err(CardError::render(format!(
            "cannot cover {}x{} with a {}x{} image",
            target.width, target.height, src.width, src.height
        )));
    }

    let scale = f64::max(
        f64::from(target.width) / f64::from(src.width),
        f64::from(target.height) / f64::from(src.height),
    );
    let sw = ((f64::from(src.width) * scale).round() as u32).max(target.width);
    let sh = ((f64::from(src.height) * scale).round() as u32).max(target.height);

    let resized = img.resize_exact(sw, sh, FilterType::Lanczos3);
    let x = (sw - target.width) / 2;
    let y = match gravity {
        CropGravity::Top => 0,
        CropGravity::Center => (sh - target.height) / 2,
        CropGravity::Bottom => sh - target.height,
    };
    let cropped = resized.crop_imm(x, y, target.width, target.height).to_rgba8();

    let mut data = cropped.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Surface::from_premul(target, data)
}

/// Straight alpha to premultiplied alpha.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Premultiplied alpha back to straight alpha.
pub fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
