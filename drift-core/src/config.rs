use crate::palette::{Palette, Rgba};

/// Configuration for the drifting particle field.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Number of particles to spawn.
    pub quantity: usize,
    /// Maximum pointer-to-particle distance at which attraction applies, px.
    pub attract_radius: f32,
    /// Weighted palette particles draw their color from.
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            quantity: 180,
            attract_radius: 300.0,
            palette: Palette::hero(),
        }
    }
}

/// Configuration for the orbiting halo ring.
#[derive(Clone, Debug)]
pub struct HaloConfig {
    pub count: usize,
    /// Base ring radius, px.
    pub radius: f32,
    /// Colors sampled uniformly per particle.
    pub colors: Vec<Rgba>,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            count: 40,
            radius: 220.0,
            colors: vec![
                Rgba::with_alpha(255, 255, 255, 0.15),
                Rgba::with_alpha(255, 255, 255, 0.08),
                Rgba::with_alpha(160, 160, 160, 0.10),
            ],
        }
    }
}

/// Host-provided options shared by both drivers.
#[derive(Clone, Copy, Debug)]
pub struct DriverOptions {
    /// When set, the driver renders a single static frame and never
    /// schedules another one.
    pub reduced_motion: bool,
    /// Device pixel ratio reported by the host; clamped to at most 2.
    pub pixel_ratio: f32,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            pixel_ratio: 1.0,
        }
    }
}
