//! Interactive drift-field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the animation state (particle
//! field, pointer, halo ring, configuration) and implements [`eframe::App`]
//! to render and control the animation through an egui UI.
//!
//! The viewer drives the core directly, the way a host page would: hover
//! position feeds the pointer, the panel rect feeds the wrap bounds, and the
//! core renderer paints through a [`Surface`] backed by `egui::Painter`.

use drift_core::{
    config::{FieldConfig, HaloConfig},
    halo::HaloRing,
    motion,
    palette::Rgba,
    particle::ParticleField,
    pointer::Pointer,
    surface::{Surface, render_field},
};
use eframe::App;
use glam::Vec2;
use rand::rng;

/// Bounds used before the first frame reports the real panel size.
const INITIAL_SIZE: (f32, f32) = (1280.0, 720.0);

/// A [`Surface`] over an egui painter clipped to the animation panel.
///
/// `clear` is a no-op: egui repaints the panel from scratch every frame.
struct PaintSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    width: f32,
    height: f32,
}

impl Surface for PaintSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32, _scale: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {}

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        let a = (color.a * alpha).clamp(0.0, 1.0);
        let fill = egui::Color32::from_rgba_unmultiplied(
            color.r,
            color.g,
            color.b,
            (a * 255.0).round() as u8,
        );
        self.painter.circle_filled(
            egui::pos2(self.origin.x + center.x, self.origin.y + center.y),
            radius,
            fill,
        );
    }
}

/// Main application state for the interactive viewer.
pub struct Viewer {
    field: ParticleField,
    pointer: Pointer,
    cfg: FieldConfig,

    halo: HaloRing,
    halo_cfg: HaloConfig,

    rng: rand::rngs::ThreadRng,

    running: bool,
    show_halo: bool,
    reduced_motion: bool,

    /// Last hover position, to feed the pointer only on actual movement.
    last_hover: Option<Vec2>,
    /// Epoch for the halo's elapsed time, set on the first animated frame.
    started_at: Option<f64>,
    last_now_ms: f64,
    last_frame_ms: f64,
}

impl Viewer {
    /// Creates a viewer with default field and halo configurations, spawned
    /// into the initial bounds. The animation auto-runs.
    pub fn new() -> Self {
        let mut rng = rng();
        let cfg = FieldConfig::default();
        let halo_cfg = HaloConfig::default();

        let (w, h) = INITIAL_SIZE;
        let field = ParticleField::spawn(cfg.quantity, w, h, &cfg.palette, &mut rng);
        let halo = HaloRing::spawn(&halo_cfg, Vec2::new(w / 2.0, h / 2.0), &mut rng);

        Self {
            field,
            pointer: Pointer::new(),
            cfg,
            halo,
            halo_cfg,
            rng,
            running: true,
            show_halo: false,
            reduced_motion: false,
            last_hover: None,
            started_at: None,
            last_now_ms: 0.0,
            last_frame_ms: 0.0,
        }
    }

    /// Respawns the field and halo with the current configuration and
    /// bounds, clears pointer state, and pauses.
    fn reset(&mut self) {
        let (w, h) = (self.field.width, self.field.height);
        self.field = ParticleField::spawn(self.cfg.quantity, w, h, &self.cfg.palette, &mut self.rng);
        self.halo = HaloRing::spawn(&self.halo_cfg, Vec2::new(w / 2.0, h / 2.0), &mut self.rng);
        self.pointer = Pointer::new();
        self.last_hover = None;
        self.started_at = None;
        self.running = false;
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, config, toggles).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                Self::labeled_drag_usize(ui, "quantity:", &mut self.cfg.quantity, 1..=2000, 1.0);
                Self::labeled_drag_f32(
                    ui,
                    "attract radius:",
                    &mut self.cfg.attract_radius,
                    10.0..=1000.0,
                    1.0,
                );

                ui.separator();
                ui.checkbox(&mut self.show_halo, "Halo overlay");
                ui.checkbox(&mut self.reduced_motion, "Reduced motion");
            });
        });
    }

    /// Builds the bottom status bar (counts, pointer activity, frame time).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frame = {:.1} ms", self.last_frame_ms));
                ui.separator();
                ui.label(format!("particles = {}", self.field.particles.len()));
                ui.label(format!(
                    "pointer = {}",
                    if self.pointer.active { "active" } else { "idle" }
                ));
            });
        });
    }

    /// Builds the central animation panel: feeds input to the core, steps
    /// the motion once, and paints through the core renderer.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            let now_ms = ctx.input(|i| i.time) * 1000.0;

            // The panel rect is the animation's logical bounds.
            self.field.set_bounds(rect.width(), rect.height());

            // Only actual movement re-arms the pointer activity window.
            if let Some(hover) = response.hover_pos() {
                let local = Vec2::new(hover.x - rect.min.x, hover.y - rect.min.y);
                if self.last_hover != Some(local) {
                    self.pointer.record_move(local, now_ms);
                    self.last_hover = Some(local);
                }
            }
            self.pointer.tick(now_ms);

            let animate = self.running && !self.reduced_motion;
            if animate {
                motion::step(&mut self.field, &self.pointer, &self.cfg);
            }

            let mut surface = PaintSurface {
                painter: &painter,
                origin: rect.min,
                width: rect.width(),
                height: rect.height(),
            };
            render_field(&self.field, &mut surface);

            if self.show_halo {
                self.halo
                    .recenter(Vec2::new(rect.width() / 2.0, rect.height() / 2.0));
                if animate {
                    let elapsed = now_ms - *self.started_at.get_or_insert(now_ms);
                    self.halo.render(elapsed, &mut surface);
                } else {
                    self.halo.render_static(&mut surface);
                }
            }

            if animate {
                if self.last_now_ms > 0.0 {
                    self.last_frame_ms = now_ms - self.last_now_ms;
                }
                self.last_now_ms = now_ms;
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
