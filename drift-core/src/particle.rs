use crate::palette::{Palette, Rgba};
use glam::Vec2;
use rand::Rng;

/// One animated point.
///
/// `pos` chases a target every frame; `home` is the ambient drift target the
/// particle falls back to when the pointer is not pulling on it. `radius`,
/// `alpha`, `ease` and `color` are assigned at spawn and never change.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub home: Vec2,
    /// Constant ambient velocity applied to `home` each frame.
    pub drift: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Exponential-smoothing factor, `0 < ease <= 1`. Larger eases converge
    /// on the target faster, giving visibly different trail speeds.
    pub ease: f32,
    pub color: Rgba,
}

/// The particle store: a fixed set of particles plus the logical bounds
/// their home positions wrap within.
#[derive(Debug)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub width: f32,
    pub height: f32,
}

impl ParticleField {
    /// Spawns `count` particles with randomized attributes.
    ///
    /// Home positions are uniform within the bounds and each particle starts
    /// at its home. The random source is injected so spawns are reproducible.
    ///
    /// ### Panics
    /// Panics if `width` or `height` is not positive.
    pub fn spawn(
        count: usize,
        width: f32,
        height: f32,
        palette: &Palette,
        rng: &mut impl Rng,
    ) -> Self {
        assert!(width > 0.0 && height > 0.0, "field bounds must be positive");

        let particles = (0..count)
            .map(|_| {
                let home = Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
                Particle {
                    pos: home,
                    home,
                    drift: Vec2::new(
                        rng.random_range(-0.15..=0.15),
                        rng.random_range(-0.15..=0.15),
                    ),
                    radius: rng.random_range(1.0..=3.0),
                    alpha: rng.random_range(0.3..=0.8),
                    ease: rng.random_range(0.03..=0.10),
                    color: palette.pick(rng),
                }
            })
            .collect();

        Self {
            particles,
            width,
            height,
        }
    }

    /// Updates the wrap bounds after a resize. Particles are kept as-is.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}
