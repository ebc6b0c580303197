//! Per-frame update phases for the drifting particle field.
//!
//! The update loop runs two phases in order:
//! 1. [`drift_phase`] — each home position advances by its drift velocity
//!    and wraps within an inflated bounding box.
//! 2. [`ease_phase`] — each particle picks a target (home, or a
//!    pointer-pulled point when the pointer is active and close enough) and
//!    interpolates its position toward it by its own ease factor.
//!
//! [`step`] runs both phases and is what a driver calls once per frame.

use crate::config::FieldConfig;
use crate::particle::ParticleField;
use crate::pointer::Pointer;

/// Homes wrap this many pixels beyond each edge before re-entering on the
/// opposite side.
pub const WRAP_MARGIN: f32 = 20.0;

/// Advances every home position by its drift velocity and wraps it.
///
/// A home coordinate that moves past `-WRAP_MARGIN` re-enters at
/// `extent + WRAP_MARGIN`, and one past `extent + WRAP_MARGIN` re-enters at
/// `-WRAP_MARGIN`, per axis. Current positions are untouched; they chase the
/// wrapped home through [`ease_phase`] on later frames.
///
/// ### Parameters
/// - `field` - The particle store; homes are mutated in place.
pub fn drift_phase(field: &mut ParticleField) {
    let (w, h) = (field.width, field.height);

    for p in &mut field.particles {
        p.home += p.drift;

        if p.home.x < -WRAP_MARGIN {
            p.home.x = w + WRAP_MARGIN;
        } else if p.home.x > w + WRAP_MARGIN {
            p.home.x = -WRAP_MARGIN;
        }

        if p.home.y < -WRAP_MARGIN {
            p.home.y = h + WRAP_MARGIN;
        } else if p.home.y > h + WRAP_MARGIN {
            p.home.y = -WRAP_MARGIN;
        }
    }
}

/// Moves every particle toward its current target by its ease factor.
///
/// The default target is the particle's home. When the pointer is active and
/// the particle lies within `cfg.attract_radius` of it, the target becomes
/// `pos + (pointer - pos) * strength` with `strength = 1 - dist / radius`,
/// i.e. a pull toward the pointer that grows stronger the closer the
/// particle already is. The position update itself is exponential smoothing:
/// `pos += (target - pos) * ease`.
///
/// ### Parameters
/// - `field` - The particle store; positions are mutated in place.
/// - `pointer` - Current pointer state; only read.
/// - `cfg` - Provides the attraction radius.
pub fn ease_phase(field: &mut ParticleField, pointer: &Pointer, cfg: &FieldConfig) {
    for p in &mut field.particles {
        let mut target = p.home;

        if pointer.active {
            let to_pointer = pointer.pos - p.pos;
            let dist = to_pointer.length();

            if dist < cfg.attract_radius {
                let strength = 1.0 - dist / cfg.attract_radius;
                target = p.pos + to_pointer * strength;
            }
        }

        p.pos += (target - p.pos) * p.ease;
    }
}

/// Runs one full motion update: [`drift_phase`] then [`ease_phase`].
pub fn step(field: &mut ParticleField, pointer: &Pointer, cfg: &FieldConfig) {
    drift_phase(field);
    ease_phase(field, pointer, cfg);
}
