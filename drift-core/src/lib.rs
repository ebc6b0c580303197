//! Core drift-field particle animation library.
//!
//! Main components:
//! - [`particle`] — particle records and the drifting field store.
//! - [`palette`] — RGBA color type and weighted color palette.
//! - [`pointer`] — pointer state with an auto-expiring activity window.
//! - [`motion`] — per-frame update phases (home drift, pointer easing).
//! - [`halo`] — orbiting ring variant driven analytically by elapsed time.
//! - [`surface`] — drawing-surface abstraction and the field renderer.
//! - [`driver`] — frame-loop drivers with lifecycle and event wiring.
//! - [`config`] — configuration for the field and halo animations.

pub mod config;
pub mod driver;
pub mod halo;
pub mod motion;
pub mod palette;
pub mod particle;
pub mod pointer;
pub mod surface;
