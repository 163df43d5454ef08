use crate::driver::Driver;

/// Seconds elapsed on the library's monotonic clock.
#[inline]
pub fn time<D: Driver>(driver: &D) -> f64 {
    driver.time()
}

/// Processes pending events and returns immediately.
#[inline]
pub fn poll<D: Driver>(driver: &D) {
    driver.poll();
}

/// Sleeps until an event arrives, then processes pending events.
#[inline]
pub fn wait<D: Driver>(driver: &D) {
    driver.wait();
}
