//! Easing curves and a single-value tween.

/// Easing curve applied to normalized time.
///
/// The `PowerN` names follow the usual web animation vocabulary: `Power1Out`
/// is a quadratic ease-out, `Power3Out` a quartic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power1Out,
    Power2InOut,
    Power3Out,
    Power4Out,
}

impl Easing {
    /// Map progress `t` (clamped to 0..=1) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::Power4Out => 1.0 - (1.0 - t).powi(5),
        }
    }
}

/// Interpolates one value from `start` to `end` over `duration` seconds,
/// after an initial `delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    easing: Easing,
    start: f32,
    end: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(easing: Easing, start: f32, end: f32, duration: f32) -> Self {
        Self {
            easing,
            start,
            end,
            duration: duration.max(0.0),
            delay: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// True once the delay has passed.
    pub fn has_started(&self) -> bool {
        self.elapsed >= self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Value at the current point in time.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.end;
        }
        let local = (self.elapsed - self.delay).max(0.0);
        let t = if self.duration > 0.0 { local / self.duration } else { 1.0 };
        self.start + (self.end - self.start) * self.easing.apply(t)
    }

    /// Step forward by `dt` seconds and return the new value.
    pub fn apply(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power1Out,
        Easing::Power2InOut,
        Easing::Power3Out,
        Easing::Power4Out,
    ];

    #[test]
    fn curves_hit_both_ends() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < f32::EPSILON, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON, "{easing:?}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut previous = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= previous, "{easing:?} decreased at step {i}");
                previous = value;
            }
        }
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        for easing in [Easing::Power1Out, Easing::Power3Out, Easing::Power4Out] {
            assert!(easing.apply(0.5) > 0.5);
        }
        assert!(Easing::Power4Out.apply(0.3) > Easing::Power1Out.apply(0.3));
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-2.0), 0.0);
        assert_eq!(Easing::Power3Out.apply(7.0), 1.0);
    }

    #[test]
    fn tween_waits_for_delay() {
        let mut tween = Tween::new(Easing::Linear, 0.0, 100.0, 1.0).with_delay(0.5);
        assert_eq!(tween.apply(0.25), 0.0);
        assert!(!tween.has_started());
        assert_eq!(tween.apply(0.25), 0.0);
        assert!(tween.has_started());
        assert_eq!(tween.apply(0.5), 50.0);
        assert_eq!(tween.apply(0.5), 100.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let mut tween = Tween::new(Easing::Power3Out, 3.0, 9.0, 0.0);
        assert_eq!(tween.apply(0.0), 9.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn overshooting_lands_on_end_value() {
        let mut tween = Tween::new(Easing::Power1Out, 1.15, 1.0, 6.0);
        assert_eq!(tween.apply(10.0), 1.0);
    }
}
