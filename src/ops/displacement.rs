// ============================================================================
// DISPLACEMENT MAPS — rounded-glass refraction field, rayon-parallelized
// ============================================================================
//
// A displacement map tells a downstream filter how far to push each pixel of
// whatever sits behind a UI element. R carries the X offset, G the Y offset,
// 128 meaning "stay put". B is fixed at 128 and A at 255.
//
// The glass is a rounded rectangle whose rim (the bezel) curves down like a
// quarter circle. Three zones per pixel:
//   - Outside the shape:        no displacement
//   - Bezel (edge → bezel_width): push along the outward SDF normal,
//                                  strongest at the edge
//   - Flat interior:            no displacement
// ============================================================================

use std::f64::consts::FRAC_PI_2;

use image::RgbaImage;
use rayon::prelude::*;

use crate::error::GlassError;

/// Channel value meaning zero displacement.
pub const NEUTRAL: u8 = 128;

/// Channel swing for a unit displacement.
const AMPLITUDE: f64 = 127.0;

/// Finite-difference probe distance, in pixels.
const GRADIENT_STEP: f64 = 1.0;

/// Which part of the glass a point falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Outside,
    Bezel,
    Flat,
}

/// The four numbers that fully determine a displacement map.
///
/// `border_radius` and `bezel_width` are not validated: a radius larger than
/// half the smaller side simply shrinks the rounded region, and a bezel of
/// zero or less leaves (almost) every pixel undisplaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassShape {
    pub width: u32,
    pub height: u32,
    pub border_radius: f64,
    pub bezel_width: f64,
}

impl GlassShape {
    pub fn new(width: u32, height: u32, border_radius: f64, bezel_width: f64) -> Self {
        Self { width, height, border_radius, bezel_width }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half extents of the straight-edged core before the corners are inflated.
    fn core_half_extents(&self) -> (f64, f64) {
        (
            self.width as f64 / 2.0 - self.border_radius,
            self.height as f64 / 2.0 - self.border_radius,
        )
    }

    /// Translate a pixel index to coordinates relative to the shape centre.
    /// Pixels are sampled at their top-left corner.
    #[inline]
    pub fn to_local(&self, x: u32, y: u32) -> (f64, f64) {
        (
            x as f64 - self.width as f64 / 2.0,
            y as f64 - self.height as f64 / 2.0,
        )
    }

    /// Signed distance from a centre-relative point to the glass outline.
    #[inline]
    pub fn distance(&self, px: f64, py: f64) -> f64 {
        let (rw, rh) = self.core_half_extents();
        rounded_box_sdf(px, py, rw, rh, self.border_radius)
    }

    /// Bezel is inclusive at both ends; flat starts strictly past `-bezel_width`.
    pub fn zone(&self, dist: f64) -> Zone {
        if dist > 0.0 {
            Zone::Outside
        } else if dist < -self.bezel_width {
            Zone::Flat
        } else {
            Zone::Bezel
        }
    }

    /// Central-difference estimate of the SDF gradient (the outward normal).
    pub fn gradient(&self, px: f64, py: f64) -> (f64, f64) {
        let h = GRADIENT_STEP;
        let nx = (self.distance(px + h, py) - self.distance(px - h, py)) / (2.0 * h);
        let ny = (self.distance(px, py + h) - self.distance(px, py - h)) / (2.0 * h);
        (nx, ny)
    }

    /// Displacement vector at a centre-relative point, each component in [-1, 1].
    pub fn displacement_at(&self, px: f64, py: f64) -> (f64, f64) {
        let dist = self.distance(px, py);
        match self.zone(dist) {
            Zone::Outside | Zone::Flat => (0.0, 0.0),
            Zone::Bezel => {
                let (nx, ny) = self.gradient(px, py);
                let slope = bezel_slope(-dist / self.bezel_width);
                (nx * slope, ny * slope)
            }
        }
    }

    /// Quantized `[R, G, B, A]` for one pixel of the map.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (px, py) = self.to_local(x, y);
        let (dx, dy) = self.displacement_at(px, py);
        [quantize(dx), quantize(dy), NEUTRAL, 255]
    }

    /// Render the full map. Returns `Ok(None)` for a zero-sized shape.
    pub fn render(&self) -> Result<Option<RgbaImage>, GlassError> {
        if self.is_degenerate() {
            return Ok(None);
        }

        let alloc_err = || GlassError::Allocation {
            width: self.width,
            height: self.height,
        };

        let w = self.width as usize;
        let stride = w.checked_mul(4).ok_or_else(alloc_err)?;
        let len = stride
            .checked_mul(self.height as usize)
            .ok_or_else(alloc_err)?;

        let mut raw: Vec<u8> = Vec::new();
        raw.try_reserve_exact(len).map_err(|_| alloc_err())?;
        raw.resize(len, 0);

        raw.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row_out)| {
                for (x, out) in row_out.chunks_exact_mut(4).enumerate() {
                    out.copy_from_slice(&self.pixel(x as u32, y as u32));
                }
            });

        RgbaImage::from_raw(self.width, self.height, raw)
            .map(Some)
            .ok_or_else(alloc_err)
    }
}

/// Generate a displacement map for a `width`×`height` rounded glass element.
///
/// A zero width or height yields `Ok(None)`; the only error is failing to
/// allocate the raster.
pub fn generate(
    width: u32,
    height: u32,
    border_radius: f64,
    bezel_width: f64,
) -> Result<Option<RgbaImage>, GlassError> {
    GlassShape::new(width, height, border_radius, bezel_width).render()
}

/// Signed distance to a rounded box centred at the origin.
/// `rw`/`rh` are the core half extents, `r` the corner radius.
/// Negative inside, positive outside.
#[inline]
pub fn rounded_box_sdf(px: f64, py: f64, rw: f64, rh: f64, r: f64) -> f64 {
    let qx = px.abs() - rw;
    let qy = py.abs() - rh;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Slope of a quarter-circle bezel: 1 at the edge (t = 0), 0 at the flat (t = 1).
#[inline]
fn bezel_slope(t: f64) -> f64 {
    (t * FRAC_PI_2).cos()
}

/// Map a displacement component in [-1, 1] to a channel value around 128.
///
/// Rounds half to even so that `v` and `-v` land equally far from 128.
/// NaN (a zero bezel sampled exactly on the edge) saturates to 0.
#[inline]
pub fn quantize(v: f64) -> u8 {
    let offset = (v * AMPLITUDE).round_ties_even();
    (NEUTRAL as f64 + offset).clamp(0.0, 255.0) as u8
}
