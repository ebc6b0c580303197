//! Drawing-surface abstraction and the field renderer.
//!
//! Drivers own a [`Surface`] rather than a concrete canvas so tests can
//! substitute a recording double and the viewer can paint through egui.

use crate::palette::Rgba;
use crate::particle::ParticleField;
use glam::Vec2;
use thiserror::Error;

/// The drawing surface handed to construction was missing or degenerate.
#[derive(Debug, Error)]
#[error("invalid drawing surface: {reason}")]
pub struct InvalidSurfaceError {
    pub reason: String,
}

/// A 2-D drawing surface.
pub trait Surface {
    /// Logical (CSS-pixel) dimensions.
    fn size(&self) -> (f32, f32);

    /// Recomputes pixel dimensions for new logical bounds and a
    /// device-pixel-ratio scale.
    fn resize(&mut self, width: f32, height: f32, scale: f32);

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Draws a filled circle. The effective opacity is `color.a * alpha`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);
}

/// Checks that a surface has finite, positive dimensions.
///
/// Drivers call this at construction so a missing or collapsed surface fails
/// fast instead of animating into nothing.
pub fn validate(surface: &impl Surface) -> Result<(f32, f32), InvalidSurfaceError> {
    let (w, h) = surface.size();
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(InvalidSurfaceError {
            reason: format!("dimensions {w}x{h}"),
        });
    }
    Ok((w, h))
}

/// Clears the surface and draws every particle at its current position.
pub fn render_field(field: &ParticleField, surface: &mut impl Surface) {
    surface.clear();
    for p in &field.particles {
        surface.fill_circle(p.pos, p.radius, p.color, p.alpha);
    }
}
