use glam::Vec2;

/// How long the pointer stays active after its last movement, ms.
pub const POINTER_TIMEOUT_MS: f64 = 3000.0;

/// Pointer state with an auto-expiring activity window.
///
/// Movement re-arms a 3-second deadline; once the clock passes it the
/// pointer deactivates and particles fall back to their home targets. The
/// clock is injected as explicit `now_ms` arguments so tests can drive a
/// simulated one.
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    pub pos: Vec2,
    pub active: bool,
    expires_at: Option<f64>,
}

impl Pointer {
    pub fn new() -> Self {
        Self {
            // Far off-screen until the first movement arrives.
            pos: Vec2::new(-9999.0, -9999.0),
            active: false,
            expires_at: None,
        }
    }

    /// Records a movement: updates the position, activates the pointer and
    /// re-arms the activity deadline.
    pub fn record_move(&mut self, pos: Vec2, now_ms: f64) {
        self.pos = pos;
        self.active = true;
        self.expires_at = Some(now_ms + POINTER_TIMEOUT_MS);
    }

    /// Expires the activity window if the deadline has passed.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(deadline) = self.expires_at
            && now_ms >= deadline
        {
            self.active = false;
            self.expires_at = None;
        }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_and_off_screen() {
        let pointer = Pointer::new();
        assert!(!pointer.active);
        assert_eq!(pointer.pos, Vec2::new(-9999.0, -9999.0));
    }

    #[test]
    fn movement_activates_and_expires_after_timeout() {
        let mut pointer = Pointer::new();
        pointer.record_move(Vec2::new(100.0, 50.0), 0.0);
        assert!(pointer.active);
        assert_eq!(pointer.pos, Vec2::new(100.0, 50.0));

        // Still inside the window.
        pointer.tick(2999.0);
        assert!(pointer.active);

        // At the deadline the pointer deactivates.
        pointer.tick(3000.0);
        assert!(!pointer.active);
    }

    #[test]
    fn movement_re_arms_the_window() {
        let mut pointer = Pointer::new();
        pointer.record_move(Vec2::ZERO, 0.0);
        pointer.record_move(Vec2::new(10.0, 0.0), 2000.0);

        // Would have expired relative to the first move, but not the second.
        pointer.tick(3500.0);
        assert!(pointer.active);

        pointer.tick(5000.0);
        assert!(!pointer.active);
    }

    #[test]
    fn tick_without_movement_is_a_no_op() {
        let mut pointer = Pointer::new();
        pointer.tick(10_000.0);
        assert!(!pointer.active);
    }
}
