use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{
    assets::decode::demultiply_rgba8_in_place,
    foundation::{
        core::{Rgba8, Size},
        error::{CardError, CardResult},
    },
    render::composite::{mask, over},
};

/// Premultiplied RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    size: Size,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(size: Size) -> CardResult<Self> {
        if size.is_empty() {
            return Err(CardError::render("surface size must be non-zero"));
        }
        Ok(Self {
            size,
            data: vec![0; size.rgba8_len()],
        })
    }

    /// Surface filled with one color.
    pub fn solid(size: Size, color: Rgba8) -> CardResult<Self> {
        let mut s = Self::new(size)?;
        s.fill(color);
        Ok(s)
    }

    /// Wrap an existing premultiplied buffer.
    pub fn from_premul(size: Size, data: Vec<u8>) -> CardResult<Self> {
        if size.is_empty() || data.len() != size.rgba8_len() {
            return Err(CardError::render(format!(
                "surface buffer of {} bytes does not match {}x{}",
                data.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self { size, data })
    }

    /// Pixel size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Draw `src` with its top-left corner at `(x, y)`. Parts outside `self` are clipped.
    pub fn composite_at(&mut self, src: &Surface, x: i64, y: i64, opacity: f32) {
        let dw = i64::from(self.size.width);
        let dh = i64::from(self.size.height);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.size.width)).min(dw);
        let y1 = (y + i64::from(src.size.height)).min(dh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for dy in y0..y1 {
            let sy = (dy - y) as u32;
            for dx in x0..x1 {
                let sx = (dx - x) as u32;
                let si = src.index(sx, sy);
                let di = self.index(dx as u32, dy as u32);
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s, opacity));
            }
        }
    }

    /// Clip the corners to quarter circles of `radius` pixels, anti-aliased.
    pub fn round_corners(&mut self, radius: f32) {
        let max_r = self.size.width.min(self.size.height) as f32 / 2.0;
        let r = radius.clamp(0.0, max_r);
        if r <= 0.0 {
            return;
        }
        let w = self.size.width as f32;
        let h = self.size.height as f32;
        let reach = r.ceil() as u32;
        let near = |v: u32, len: u32| v < reach || v >= len.saturating_sub(reach);

        for yy in 0..self.size.height {
            if !near(yy, self.size.height) {
                continue;
            }
            for xx in 0..self.size.width {
                if !near(xx, self.size.width) {
                    continue;
                }
                // Distance from the pixel center to the nearest corner circle center.
                let px = xx as f32 + 0.5;
                let py = yy as f32 + 0.5;
                let cx = px.clamp(r, w - r);
                let cy = py.clamp(r, h - r);
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (r - dist + 0.5).clamp(0.0, 1.0);
                if coverage >= 1.0 {
                    continue;
                }
                let i = self.index(xx, yy);
                let p = [
                    self.data[i],
                    self.data[i + 1],
                    self.data[i + 2],
                    self.data[i + 3],
                ];
                let cov = (coverage * 255.0).round() as u8;
                self.data[i..i + 4].copy_from_slice(&mask(p, cov));
            }
        }
    }

    /// Straight-alpha copy for encoding.
    pub fn to_rgba_image(&self) -> CardResult<image::RgbaImage> {
        let mut data = self.data.clone();
        demultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.size.width, self.size.height, data)
            .ok_or_else(|| CardError::render("surface buffer size mismatch"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> CardResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Write a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> CardResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory '{}'", parent.display()))?;
        }
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.size.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
