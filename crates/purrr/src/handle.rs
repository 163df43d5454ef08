//! Exclusive ownership of a native handle.

use crate::driver::{Driver, RawRenderer, RawWindow};

/// A raw handle type the driver knows how to release.
pub trait Release<D: Driver>: Copy {
    fn release(self, driver: &D);
}

impl<D: Driver> Release<D> for RawWindow {
    fn release(self, driver: &D) {
        driver.destroy_window(self);
    }
}

impl<D: Driver> Release<D> for RawRenderer {
    fn release(self, driver: &D) {
        driver.destroy_renderer(self);
    }
}

/// Move-only box around one native handle.
///
/// The handle is released exactly once: by [`Owned::release`] or on drop,
/// whichever comes first. A box that is empty (never filled, already
/// released, taken from, or disowned) does nothing on release.
pub struct Owned<H: Release<D>, D: Driver> {
    raw: Option<H>,
    driver: D,
}

impl<H: Release<D>, D: Driver> Owned<H, D> {
    pub fn new(raw: H, driver: D) -> Self {
        Self { raw: Some(raw), driver }
    }

    pub fn empty(driver: D) -> Self {
        Self { raw: None, driver }
    }

    #[inline]
    pub fn get(&self) -> Option<H> {
        self.raw
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.raw.is_some()
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Moves the handle into a new box, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            raw: self.raw.take(),
            driver: self.driver.clone(),
        }
    }

    /// Gives up ownership without releasing.
    pub fn disown(&mut self) -> Option<H> {
        self.raw.take()
    }

    /// Releases the handle now. No-op on an empty box.
    pub fn release(&mut self) {
        if let Some(raw) = self.raw.take() {
            raw.release(&self.driver);
        }
    }
}

impl<H: Release<D>, D: Driver> Drop for Owned<H, D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn renderer(driver: &MockDriver) -> RawRenderer {
        let mut raw = RawRenderer::NULL;
        assert!(!driver.create_renderer(&mut raw).is_failure());
        raw
    }

    #[test]
    fn drop_releases_once() {
        let driver = MockDriver::new();
        let raw = renderer(&driver);
        {
            let _owned = Owned::new(raw, driver.clone());
        }
        assert_eq!(driver.renderer_destroy_count(raw), 1);
    }

    #[test]
    fn explicit_release_then_drop_is_single_release() {
        let driver = MockDriver::new();
        let raw = renderer(&driver);
        let mut owned = Owned::new(raw, driver.clone());
        owned.release();
        owned.release();
        drop(owned);
        assert_eq!(driver.renderer_destroy_count(raw), 1);
    }

    #[test]
    fn take_moves_ownership() {
        let driver = MockDriver::new();
        let raw = renderer(&driver);
        let mut source = Owned::new(raw, driver.clone());
        let dest = source.take();

        assert!(!source.is_live());
        assert_eq!(dest.get(), Some(raw));

        drop(source);
        assert_eq!(driver.renderer_destroy_count(raw), 0);
        drop(dest);
        assert_eq!(driver.renderer_destroy_count(raw), 1);
    }

    #[test]
    fn disown_skips_release() {
        let driver = MockDriver::new();
        let raw = renderer(&driver);
        let mut owned = Owned::new(raw, driver.clone());
        assert_eq!(owned.disown(), Some(raw));
        drop(owned);
        assert_eq!(driver.renderer_destroy_count(raw), 0);
    }

    #[test]
    fn empty_box_never_releases() {
        let driver = MockDriver::new();
        drop(Owned::<RawWindow, _>::empty(driver.clone()));
        assert!(driver.destroyed_windows().is_empty());
    }
}
