use crate::{
    assets::decode::{cover_resize, decode_image, image_to_surface},
    foundation::{
        core::{CropGravity, Size},
        error::CardResult,
    },
    imagegen::client::{FalClient, ImageGenerator, ImageSize},
    render::surface::Surface,
};

/// Environment variable holding the fal.ai key.
pub const FAL_KEY_VAR: &str = "FAL_KEY";

/// Client configured from [`FAL_KEY_VAR`], or `None` (with a warning) when it is unset.
pub fn fal_client_from_env() -> Option<FalClient> {
    match std::env::var(FAL_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Some(FalClient::new(key.trim())),
        _ => {
            tracing::warn!("{FAL_KEY_VAR} not set, using placeholder images");
            None
        }
    }
}

/// Where an image came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Returned by the generator.
    Generated,
    /// Drawn locally.
    Placeholder,
}

/// An image ready to save or composite.
#[derive(Debug)]
pub struct ProducedImage {
    /// Pixels.
    pub surface: Surface,
    /// Generator or placeholder.
    pub origin: ImageOrigin,
}

/// Ask `generator` for an image, falling back to `placeholder` on any failure.
///
/// API and decode failures are logged and never fatal. With a `target` size the generated
/// image is cover-resized (center gravity); otherwise it keeps its own size.
pub fn generate_or_placeholder<G, F>(
    generator: Option<&G>,
    prompt: &str,
    size: ImageSize,
    target: Option<Size>,
    placeholder: F,
) -> CardResult<ProducedImage>
where
    G: ImageGenerator + ?Sized,
    F: FnOnce() -> CardResult<Surface>,
{
    if let Some(generator) = generator {
        match generator.generate_image(prompt, size) {
            Ok(bytes) => match decode_generated(&bytes, target) {
                Ok(surface) => {
                    return Ok(ProducedImage {
                        surface,
                        origin: ImageOrigin::Generated,
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "generated image unusable, using placeholder")
                }
            },
            Err(e) => tracing::error!(error = %e, "image generation failed, using placeholder"),
        }
    }
    Ok(ProducedImage {
        surface: placeholder()?,
        origin: ImageOrigin::Placeholder,
    })
}

fn decode_generated(bytes: &[u8], target: Option<Size>) -> CardResult<Surface> {
    let img = decode_image(bytes)?;
    match target {
        Some(t) => cover_resize(&img, t, CropGravity::Center),
        None => image_to_surface(&img),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imagegen/fallback.rs"]
mod tests;
