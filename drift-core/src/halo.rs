//! Orbiting halo ring: the analytic companion to the drifting field.
//!
//! Unlike [`crate::motion`], nothing here is iterated frame to frame —
//! particle positions are pure functions of elapsed time (orbit angle plus a
//! sine-driven radius "breathing"), and there is no pointer interaction.

use crate::config::HaloConfig;
use crate::palette::Rgba;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Amplitude of the radius breathing, px.
const BREATHE_AMPLITUDE: f32 = 6.0;
/// Angular rate of the radius breathing, rad/ms.
const BREATHE_RATE: f32 = 0.0008;
/// Angular rate of the alpha pulse, rad/ms.
const PULSE_RATE: f32 = 0.0015;

/// One orbiting point. All attributes are fixed at spawn; position and
/// opacity are derived from them and the elapsed time.
#[derive(Clone, Debug)]
pub struct HaloParticle {
    pub base_angle: f32,
    pub radius_offset: f32,
    /// Orbital angular speed, rad/ms.
    pub orbit_speed: f32,
    pub size: f32,
    pub base_alpha: f32,
    pub phase_offset: f32,
    pub color: Rgba,
}

/// The halo store: orbiting particles around a center at a base radius.
#[derive(Debug)]
pub struct HaloRing {
    pub particles: Vec<HaloParticle>,
    pub radius: f32,
    pub center: Vec2,
}

impl HaloRing {
    /// Spawns `cfg.count` particles spaced evenly around the ring, with
    /// randomized offsets, speeds and colors.
    pub fn spawn(cfg: &HaloConfig, center: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..cfg.count)
            .map(|i| HaloParticle {
                base_angle: TAU * i as f32 / cfg.count as f32,
                radius_offset: rng.random_range(-15.0..=15.0),
                orbit_speed: rng.random_range(0.0003..=0.0009),
                size: rng.random_range(0.3..=1.3),
                base_alpha: rng.random_range(0.08..=0.2),
                phase_offset: rng.random_range(0.0..TAU),
                color: cfg.colors[rng.random_range(0..cfg.colors.len())],
            })
            .collect();

        Self {
            particles,
            radius: cfg.radius,
            center,
        }
    }

    /// Moves the ring center, typically after a surface resize.
    pub fn recenter(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Samples one particle's position and opacity at `elapsed_ms`.
    ///
    /// The angle advances linearly, the radius breathes by a sine of elapsed
    /// time, and the opacity pulses between zero and the base alpha's double
    /// weight, phase-shifted per particle.
    pub fn sample(&self, p: &HaloParticle, elapsed_ms: f64) -> (Vec2, f32) {
        let t = elapsed_ms as f32;
        let angle = p.base_angle + t * p.orbit_speed;
        let breathe = (t * BREATHE_RATE + p.phase_offset).sin() * BREATHE_AMPLITUDE;
        let r = self.radius + p.radius_offset + breathe;

        let pos = self.center + Vec2::new(angle.cos(), angle.sin()) * r;
        let alpha = p.base_alpha * (0.5 + 0.5 * (t * PULSE_RATE + p.phase_offset).sin());
        (pos, alpha)
    }

    /// Clears the surface and draws the ring as sampled at `elapsed_ms`.
    pub fn render(&self, elapsed_ms: f64, surface: &mut impl Surface) {
        surface.clear();
        for p in &self.particles {
            let (pos, alpha) = self.sample(p, elapsed_ms);
            surface.fill_circle(pos, p.size, p.color, alpha);
        }
    }

    /// Draws the time-independent pose: base angles, base radii, base alpha.
    /// Used for the reduced-motion single frame.
    pub fn render_static(&self, surface: &mut impl Surface) {
        surface.clear();
        for p in &self.particles {
            let r = self.radius + p.radius_offset;
            let pos = self.center + Vec2::new(p.base_angle.cos(), p.base_angle.sin()) * r;
            surface.fill_circle(pos, p.size, p.color, p.base_alpha);
        }
    }
}
