//! Column-level smooth scroll with exponential ease-out.
//!
//! A smooth request only moves the target.  Each tick the position closes a
//! fixed fraction of the remaining distance, so strips slide quickly at
//! first and then decelerate into place.

/// Horizontal smooth-scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset currently shown on screen (fractional columns).
    position: f64,
    /// Offset the animation is heading for.
    target: f64,
    /// `position += (target - position) * speed` each tick.
    /// Higher speed = faster settle.  Good range: 0.25–0.45 at 20 fps.
    speed: f64,
}

/// Below this distance the animation snaps to its target.
const SNAP: f64 = 0.4;

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start (or retarget) an animation.  An in-flight animation simply
    /// continues from wherever it is now.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move immediately, cancelling any animation.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    /// Advance one frame toward the target.
    pub fn tick(&mut self) {
        let remaining = self.target - self.position;
        if remaining.abs() < SNAP {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True until the position has reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_converges_and_snaps() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(100.0);
        assert!(s.is_animating());

        let mut last = s.position();
        for _ in 0..200 {
            s.tick();
            assert!(s.position() >= last);
            assert!(s.position() <= 100.0);
            last = s.position();
            if !s.is_animating() {
                break;
            }
        }
        assert_eq!(s.position(), 100.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_retarget_mid_flight_keeps_position() {
        let mut s = SmoothScroll::new(0.5);
        s.set_target(40.0);
        s.tick();
        assert_eq!(s.position(), 20.0);

        s.set_target(0.0);
        assert_eq!(s.position(), 20.0);
        s.tick();
        assert_eq!(s.position(), 10.0);
    }

    #[test]
    fn test_jump_cancels_animation() {
        let mut s = SmoothScroll::new(0.3);
        s.set_target(50.0);
        s.tick();
        s.jump_to(7.0);
        assert_eq!(s.position(), 7.0);
        assert_eq!(s.target(), 7.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut s = SmoothScroll::new(5.0);
        s.set_target(10.0);
        s.tick();
        assert!(s.is_animating());
        assert!(s.position() < 10.0);
    }
}
