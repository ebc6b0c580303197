//! Frame-loop drivers for the field and halo animations.
//!
//! A driver owns its [`Surface`] and an [`EventSource`] (the injected
//! stand-in for window-level resize/pointer listeners) and is stepped by the
//! host through [`Scheduler`]-mediated frame callbacks:
//!
//! 1. The host constructs the driver (surface validated, events attached)
//!    and calls `start`, which renders the first frame and requests the next
//!    one — or renders exactly one static frame under reduced motion.
//! 2. Each `on_frame(now_ms, ..)` drains pending events, expires timers,
//!    updates, renders, and unconditionally requests the next frame.
//! 3. `destroy` cancels the pending frame and detaches the event source;
//!    afterwards `on_frame` is a no-op even if the host callback still fires.
//!
//! All clocks are `f64` milliseconds supplied by the caller, so tests step
//! frames and timers deterministically.

use crate::config::{DriverOptions, FieldConfig, HaloConfig};
use crate::halo::HaloRing;
use crate::motion;
use crate::particle::ParticleField;
use crate::pointer::Pointer;
use crate::surface::{self, InvalidSurfaceError, Surface, render_field};
use glam::Vec2;
use log::debug;
use rand::Rng;

/// Resize notifications settle for this long before taking effect, ms.
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

/// Device pixel ratios above this are clamped; oversampling further buys
/// nothing visible for small filled circles.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// The host's "request next tick" hook.
///
/// Production hosts forward to their display-refresh callback; tests count
/// requests and deliver frames by hand.
pub trait Scheduler {
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
}

/// A notification from the host, stamped with when it occurred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    PointerMove { pos: Vec2, at_ms: f64 },
    Resize { width: f32, height: f32, at_ms: f64 },
}

/// Injected source of resize/pointer notifications.
///
/// Drivers attach on construction and detach on teardown, so subscription
/// lifetime is deterministic and observable in tests. `drain` hands over all
/// notifications that arrived since the previous frame.
pub trait EventSource {
    fn attach(&mut self);
    fn detach(&mut self);
    fn drain(&mut self) -> Vec<Event>;
}

/// A re-armable, cancelable deadline.
#[derive(Debug, Default)]
pub struct Debounce {
    deadline: Option<f64>,
}

impl Debounce {
    /// Arms (or re-arms) the deadline at `now_ms + delay_ms`.
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline = Some(now_ms + delay_ms);
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    Running,
    Destroyed,
}

fn sanitize_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Driver for the pointer-attracted drifting field.
pub struct FieldDriver<S: Surface, E: EventSource> {
    surface: S,
    events: E,
    field: ParticleField,
    pointer: Pointer,
    cfg: FieldConfig,
    state: DriverState,
    reduced_motion: bool,
    scale: f32,
    resize_debounce: Debounce,
    pending_size: Option<(f32, f32)>,
}

impl<S: Surface, E: EventSource> FieldDriver<S, E> {
    /// Validates the surface, attaches the event source and spawns the field.
    ///
    /// Fails fast with [`InvalidSurfaceError`] when the surface is missing
    /// its dimensions; every other input has a usable default.
    pub fn new(
        mut surface: S,
        mut events: E,
        cfg: FieldConfig,
        opts: DriverOptions,
        rng: &mut impl Rng,
    ) -> Result<Self, InvalidSurfaceError> {
        let (width, height) = surface::validate(&surface)?;
        let scale = sanitize_pixel_ratio(opts.pixel_ratio);
        surface.resize(width, height, scale);
        events.attach();

        let field = ParticleField::spawn(cfg.quantity, width, height, &cfg.palette, rng);
        debug!(
            "field driver up: {} particles in {width}x{height} at scale {scale}",
            field.particles.len()
        );

        Ok(Self {
            surface,
            events,
            field,
            pointer: Pointer::new(),
            cfg,
            state: DriverState::Running,
            reduced_motion: opts.reduced_motion,
            scale,
            resize_debounce: Debounce::default(),
            pending_size: None,
        })
    }

    /// Renders the first frame. Under reduced motion this is the only frame
    /// and nothing is scheduled; otherwise the next frame is requested.
    pub fn start(&mut self, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed {
            return;
        }
        render_field(&self.field, &mut self.surface);
        if !self.reduced_motion {
            sched.request_frame();
        }
    }

    /// One frame tick: drain events, expire timers, update, render,
    /// reschedule. No back-pressure — the next frame is always requested.
    pub fn on_frame(&mut self, now_ms: f64, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed || self.reduced_motion {
            return;
        }

        for event in self.events.drain() {
            match event {
                Event::PointerMove { pos, at_ms } => self.pointer.record_move(pos, at_ms),
                Event::Resize {
                    width,
                    height,
                    at_ms,
                } => {
                    self.pending_size = Some((width, height));
                    self.resize_debounce.arm(at_ms, RESIZE_DEBOUNCE_MS);
                }
            }
        }

        self.pointer.tick(now_ms);

        if self.resize_debounce.fire(now_ms)
            && let Some((width, height)) = self.pending_size.take()
        {
            self.surface.resize(width, height, self.scale);
            self.field.set_bounds(width, height);
            debug!("field driver resized to {width}x{height}");
        }

        motion::step(&mut self.field, &self.pointer, &self.cfg);
        render_field(&self.field, &mut self.surface);
        sched.request_frame();
    }

    /// Tears the driver down: cancels the pending frame, detaches the event
    /// source, drops the timers. Idempotent.
    pub fn destroy(&mut self, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.state = DriverState::Destroyed;
        sched.cancel_frame();
        self.events.detach();
        self.resize_debounce.cancel();
        self.pending_size = None;
        debug!("field driver destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == DriverState::Destroyed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }
}

/// Driver for the orbiting halo ring. Same lifecycle shape as
/// [`FieldDriver`] but analytic motion and no pointer handling.
pub struct HaloDriver<S: Surface, E: EventSource> {
    surface: S,
    events: E,
    ring: HaloRing,
    state: DriverState,
    reduced_motion: bool,
    scale: f32,
    resize_debounce: Debounce,
    pending_size: Option<(f32, f32)>,
    /// Set on the first delivered frame; elapsed time is measured from it.
    started_at: Option<f64>,
}

impl<S: Surface, E: EventSource> HaloDriver<S, E> {
    pub fn new(
        mut surface: S,
        mut events: E,
        cfg: HaloConfig,
        opts: DriverOptions,
        rng: &mut impl Rng,
    ) -> Result<Self, InvalidSurfaceError> {
        let (width, height) = surface::validate(&surface)?;
        let scale = sanitize_pixel_ratio(opts.pixel_ratio);
        surface.resize(width, height, scale);
        events.attach();

        let center = Vec2::new(width / 2.0, height / 2.0);
        let ring = HaloRing::spawn(&cfg, center, rng);
        debug!(
            "halo driver up: {} particles around {center} at scale {scale}",
            ring.particles.len()
        );

        Ok(Self {
            surface,
            events,
            ring,
            state: DriverState::Running,
            reduced_motion: opts.reduced_motion,
            scale,
            resize_debounce: Debounce::default(),
            pending_size: None,
            started_at: None,
        })
    }

    pub fn start(&mut self, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed {
            return;
        }
        if self.reduced_motion {
            self.ring.render_static(&mut self.surface);
            return;
        }
        self.ring.render(0.0, &mut self.surface);
        sched.request_frame();
    }

    pub fn on_frame(&mut self, now_ms: f64, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed || self.reduced_motion {
            return;
        }

        for event in self.events.drain() {
            // The halo only listens for resizes.
            if let Event::Resize {
                width,
                height,
                at_ms,
            } = event
            {
                self.pending_size = Some((width, height));
                self.resize_debounce.arm(at_ms, RESIZE_DEBOUNCE_MS);
            }
        }

        if self.resize_debounce.fire(now_ms)
            && let Some((width, height)) = self.pending_size.take()
        {
            self.surface.resize(width, height, self.scale);
            self.ring.recenter(Vec2::new(width / 2.0, height / 2.0));
            debug!("halo driver resized to {width}x{height}");
        }

        let elapsed = now_ms - *self.started_at.get_or_insert(now_ms);
        self.ring.render(elapsed, &mut self.surface);
        sched.request_frame();
    }

    pub fn destroy(&mut self, sched: &mut impl Scheduler) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.state = DriverState::Destroyed;
        sched.cancel_frame();
        self.events.detach();
        self.resize_debounce.cancel();
        self.pending_size = None;
        debug!("halo driver destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == DriverState::Destroyed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn ring(&self) -> &HaloRing {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::test_support::TestSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::mem;
    use std::rc::Rc;

    #[derive(Default)]
    struct TestScheduler {
        requests: usize,
        cancels: usize,
    }

    impl Scheduler for TestScheduler {
        fn request_frame(&mut self) {
            self.requests += 1;
        }

        fn cancel_frame(&mut self) {
            self.cancels += 1;
        }
    }

    #[derive(Default)]
    struct EventsInner {
        attached: bool,
        attach_calls: usize,
        detach_calls: usize,
        queue: Vec<Event>,
    }

    /// Event-source double the test keeps a shared handle to, so it can push
    /// notifications after the driver has taken ownership.
    #[derive(Clone, Default)]
    struct SharedEvents(Rc<RefCell<EventsInner>>);

    impl SharedEvents {
        fn push(&self, event: Event) {
            self.0.borrow_mut().queue.push(event);
        }

        fn attached(&self) -> bool {
            self.0.borrow().attached
        }

        fn detach_calls(&self) -> usize {
            self.0.borrow().detach_calls
        }
    }

    impl EventSource for SharedEvents {
        fn attach(&mut self) {
            let mut inner = self.0.borrow_mut();
            inner.attached = true;
            inner.attach_calls += 1;
        }

        fn detach(&mut self) {
            let mut inner = self.0.borrow_mut();
            inner.attached = false;
            inner.detach_calls += 1;
        }

        fn drain(&mut self) -> Vec<Event> {
            mem::take(&mut self.0.borrow_mut().queue)
        }
    }

    fn field_driver(
        opts: DriverOptions,
    ) -> (FieldDriver<TestSurface, SharedEvents>, SharedEvents) {
        let events = SharedEvents::default();
        let handle = events.clone();
        let mut rng = StdRng::seed_from_u64(99);
        let driver = FieldDriver::new(
            TestSurface::new(800.0, 600.0),
            events,
            FieldConfig::default(),
            opts,
            &mut rng,
        )
        .unwrap();
        (driver, handle)
    }

    #[test]
    fn construction_fails_fast_on_degenerate_surface() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = FieldDriver::new(
            TestSurface::new(0.0, 0.0),
            SharedEvents::default(),
            FieldConfig::default(),
            DriverOptions::default(),
            &mut rng,
        );
        assert!(result.is_err());
    }

    #[test]
    fn construction_attaches_events_and_clamps_pixel_ratio() {
        let (driver, events) = field_driver(DriverOptions {
            reduced_motion: false,
            pixel_ratio: 3.0,
        });

        assert!(events.attached());
        // The initial resize applies the clamped scale.
        assert_eq!(driver.surface().resizes, vec![(800.0, 600.0, 2.0)]);
        assert_eq!(driver.field().particles.len(), 180);
    }

    #[test]
    fn start_renders_and_schedules_the_next_frame() {
        let (mut driver, _events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();

        driver.start(&mut sched);

        assert_eq!(driver.surface().clear_calls, 1);
        assert_eq!(driver.surface().circles.len(), 180);
        assert_eq!(sched.requests, 1);
    }

    #[test]
    fn reduced_motion_renders_exactly_once_and_never_schedules() {
        let (mut driver, _events) = field_driver(DriverOptions {
            reduced_motion: true,
            pixel_ratio: 1.0,
        });
        let mut sched = TestScheduler::default();

        driver.start(&mut sched);
        assert_eq!(driver.surface().clear_calls, 1);
        assert_eq!(sched.requests, 0);

        // A stray host tick changes nothing.
        driver.on_frame(16.0, &mut sched);
        assert_eq!(driver.surface().clear_calls, 1);
        assert_eq!(sched.requests, 0);
    }

    #[test]
    fn each_frame_renders_and_reschedules() {
        let (mut driver, _events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();

        driver.start(&mut sched);
        driver.on_frame(16.0, &mut sched);
        driver.on_frame(32.0, &mut sched);

        assert_eq!(driver.surface().clear_calls, 3);
        assert_eq!(sched.requests, 3);
    }

    #[test]
    fn pointer_events_activate_then_auto_expire() {
        let (mut driver, events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);

        events.push(Event::PointerMove {
            pos: Vec2::new(400.0, 300.0),
            at_ms: 0.0,
        });
        driver.on_frame(16.0, &mut sched);
        assert!(driver.pointer().active);
        assert_eq!(driver.pointer().pos, Vec2::new(400.0, 300.0));

        // No further movement: the 3000 ms window runs out.
        driver.on_frame(2999.0, &mut sched);
        assert!(driver.pointer().active);
        driver.on_frame(3001.0, &mut sched);
        assert!(!driver.pointer().active);
    }

    #[test]
    fn resize_is_debounced_before_taking_effect() {
        let (mut driver, events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);

        events.push(Event::Resize {
            width: 1024.0,
            height: 768.0,
            at_ms: 0.0,
        });

        // 100 ms after the event: still settling.
        driver.on_frame(100.0, &mut sched);
        assert_eq!(driver.surface().resizes.len(), 1); // construction only
        assert_eq!(driver.field().width, 800.0);

        // Past the 150 ms debounce: applied to surface and wrap bounds.
        driver.on_frame(200.0, &mut sched);
        assert_eq!(driver.surface().resizes.len(), 2);
        assert_eq!(driver.surface().resizes[1], (1024.0, 768.0, 1.0));
        assert_eq!(driver.field().width, 1024.0);
        assert_eq!(driver.field().height, 768.0);
    }

    #[test]
    fn burst_of_resizes_applies_only_the_last() {
        let (mut driver, events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);

        events.push(Event::Resize {
            width: 900.0,
            height: 700.0,
            at_ms: 0.0,
        });
        events.push(Event::Resize {
            width: 1280.0,
            height: 720.0,
            at_ms: 50.0,
        });

        // 150 ms after the *first* event but only 100 ms after the second:
        // the re-armed debounce has not settled yet.
        driver.on_frame(150.0, &mut sched);
        assert_eq!(driver.surface().resizes.len(), 1);

        driver.on_frame(250.0, &mut sched);
        assert_eq!(driver.surface().resizes.len(), 2);
        assert_eq!(driver.surface().resizes[1], (1280.0, 720.0, 1.0));
    }

    #[test]
    fn destroy_cancels_frame_and_detaches_once() {
        let (mut driver, events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);

        driver.destroy(&mut sched);
        assert!(driver.is_destroyed());
        assert_eq!(sched.cancels, 1);
        assert!(!events.attached());
        assert_eq!(events.detach_calls(), 1);

        // Idempotent.
        driver.destroy(&mut sched);
        assert_eq!(sched.cancels, 1);
        assert_eq!(events.detach_calls(), 1);
    }

    #[test]
    fn no_render_after_destroy_even_if_the_host_ticks() {
        let (mut driver, _events) = field_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);
        driver.on_frame(16.0, &mut sched);

        driver.destroy(&mut sched);
        let clears = driver.surface().clear_calls;
        let requests = sched.requests;

        driver.on_frame(32.0, &mut sched);
        driver.on_frame(48.0, &mut sched);

        assert_eq!(driver.surface().clear_calls, clears);
        assert_eq!(sched.requests, requests);
    }

    #[test]
    fn debounce_fires_once_and_rearms() {
        let mut debounce = Debounce::default();
        assert!(!debounce.fire(0.0));

        debounce.arm(0.0, 150.0);
        assert!(debounce.is_armed());
        assert!(!debounce.fire(100.0));
        assert!(debounce.fire(150.0));
        assert!(!debounce.fire(151.0)); // consumed

        debounce.arm(200.0, 150.0);
        debounce.cancel();
        assert!(!debounce.fire(1000.0));
    }

    fn halo_driver(opts: DriverOptions) -> (HaloDriver<TestSurface, SharedEvents>, SharedEvents) {
        let events = SharedEvents::default();
        let handle = events.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let driver = HaloDriver::new(
            TestSurface::new(600.0, 600.0),
            events,
            HaloConfig::default(),
            opts,
            &mut rng,
        )
        .unwrap();
        (driver, handle)
    }

    #[test]
    fn halo_centers_on_the_surface_midpoint() {
        let (driver, _events) = halo_driver(DriverOptions::default());
        assert_eq!(driver.ring().center, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn halo_reduced_motion_draws_static_pose_once() {
        let (mut driver, _events) = halo_driver(DriverOptions {
            reduced_motion: true,
            pixel_ratio: 1.0,
        });
        let mut sched = TestScheduler::default();

        driver.start(&mut sched);
        assert_eq!(driver.surface().clear_calls, 1);
        assert_eq!(sched.requests, 0);

        driver.on_frame(16.0, &mut sched);
        assert_eq!(driver.surface().clear_calls, 1);
    }

    #[test]
    fn halo_resize_recenters_the_ring() {
        let (mut driver, events) = halo_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);

        events.push(Event::Resize {
            width: 1000.0,
            height: 400.0,
            at_ms: 0.0,
        });
        driver.on_frame(200.0, &mut sched);

        assert_eq!(driver.ring().center, Vec2::new(500.0, 200.0));
    }

    #[test]
    fn halo_stops_rendering_after_destroy() {
        let (mut driver, events) = halo_driver(DriverOptions::default());
        let mut sched = TestScheduler::default();
        driver.start(&mut sched);
        driver.on_frame(16.0, &mut sched);

        driver.destroy(&mut sched);
        assert_eq!(sched.cancels, 1);
        assert!(!events.attached());

        let clears = driver.surface().clear_calls;
        driver.on_frame(32.0, &mut sched);
        assert_eq!(driver.surface().clear_calls, clears);
    }
}
