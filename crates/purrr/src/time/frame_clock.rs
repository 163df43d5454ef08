use crate::driver::Driver;
use crate::events;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Library clock reading taken at the tick, in seconds.
    pub now: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock reading the library's clock.
///
/// Use one per window or render loop. Delta time is clamped so a debugger
/// pause or a minimized window does not produce a huge step, and a clock
/// that stands still does not produce a zero one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: f64,
    frame_index: u64,
    dt_min: f64,
    dt_max: f64,
}

impl FrameClock {
    /// Creates a clock starting now, with a 0.1 ms floor and 250 ms ceiling.
    pub fn new<D: Driver>(driver: &D) -> Self {
        Self::with_clamps(driver, 0.0001, 0.25)
    }

    /// Creates a clock with custom delta-time clamps, in seconds.
    ///
    /// # Panics
    /// If `dt_min > dt_max` or either bound is NaN.
    pub fn with_clamps<D: Driver>(driver: &D, dt_min: f64, dt_max: f64) -> Self {
        assert!(
            dt_min <= dt_max,
            "invalid frame clock clamps: dt_min {dt_min} must not exceed dt_max {dt_max}"
        );
        Self {
            last: events::time(driver),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline to now, e.g. after the window was restored.
    pub fn reset<D: Driver>(&mut self, driver: &D) {
        self.last = events::time(driver);
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick<D: Driver>(&mut self, driver: &D) -> FrameTime {
        let now = events::time(driver);
        // A clock that went backwards clamps to the floor as well.
        let dt = (now - self.last).clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    #[test]
    fn delta_follows_driver_clock() {
        let driver = MockDriver::new();
        driver.set_time(10.0);
        let mut clock = FrameClock::new(&driver);

        driver.advance_time(0.016);
        let ft = clock.tick(&driver);
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.now, driver.time());
        assert_eq!(ft.frame_index, 0);

        driver.advance_time(0.020);
        assert_eq!(clock.tick(&driver).frame_index, 1);
    }

    #[test]
    fn stall_is_clamped_to_ceiling() {
        let driver = MockDriver::new();
        let mut clock = FrameClock::new(&driver);
        driver.advance_time(5.0);
        assert_eq!(clock.tick(&driver).dt, 0.25);
    }

    #[test]
    fn standing_clock_is_clamped_to_floor() {
        let driver = MockDriver::new();
        let mut clock = FrameClock::with_clamps(&driver, 0.001, 0.1);
        assert_eq!(clock.tick(&driver).dt, 0.001_f64 as f32);

        // Backwards
        driver.set_time(-3.0);
        assert_eq!(clock.tick(&driver).dt, 0.001_f64 as f32);
    }

    #[test]
    #[should_panic(expected = "invalid frame clock clamps")]
    fn inverted_clamps_are_rejected_up_front() {
        let driver = MockDriver::new();
        let _ = FrameClock::with_clamps(&driver, 0.5, 0.1);
    }

    #[test]
    #[should_panic(expected = "invalid frame clock clamps")]
    fn nan_clamp_is_rejected_up_front() {
        let driver = MockDriver::new();
        let _ = FrameClock::with_clamps(&driver, f64::NAN, 0.1);
    }

    #[test]
    fn reset_moves_baseline() {
        let driver = MockDriver::new();
        let mut clock = FrameClock::new(&driver);
        driver.advance_time(3.0);
        clock.reset(&driver);
        driver.advance_time(0.05);
        assert!((clock.tick(&driver).dt - 0.05).abs() < 1e-6);
    }
}
