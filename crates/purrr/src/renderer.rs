//! The renderer: root object windows are created from.

use std::fmt;

use crate::driver::{Driver, RawRenderer};
use crate::error::{Error, Result, ResultCode};
use crate::handle::Owned;
use crate::window::{Window, WindowCreateInfo};

/// An owned native renderer.
///
/// Windows created from a renderer must be destroyed before it; the native
/// library does not track the relationship and neither does this type.
pub struct Renderer<D: Driver> {
    handle: Owned<RawRenderer, D>,
}

impl<D: Driver> Renderer<D> {
    pub fn new(driver: D) -> Result<Self> {
        let mut raw = RawRenderer::NULL;
        driver
            .create_renderer(&mut raw)
            .check("purrr_create_renderer")?;

        log::debug!("renderer created: {:?}", raw);

        Ok(Self {
            handle: Owned::new(raw, driver),
        })
    }

    #[inline]
    pub fn raw(&self) -> Option<RawRenderer> {
        self.handle.get()
    }

    #[inline]
    pub fn driver(&self) -> &D {
        self.handle.driver()
    }

    /// Creates a window drawn by this renderer.
    ///
    /// Fails with `INVALID_ARGS` without reaching the driver if this renderer
    /// no longer owns a handle.
    pub fn create_window(&self, create_info: &WindowCreateInfo) -> Result<Window<D>> {
        let Some(raw) = self.handle.get() else {
            log::debug!("purrr_create_window on a renderer without a handle");
            return Err(Error::NativeCall {
                op: "purrr_create_window",
                code: ResultCode::INVALID_ARGS,
            });
        };
        Window::create(raw, self.driver().clone(), create_info)
    }

    /// Moves the handle into a new `Renderer`, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            handle: self.handle.take(),
        }
    }

    pub fn destroy(&mut self) {
        if let Some(raw) = self.handle.get() {
            log::debug!("renderer destroyed: {:?}", raw);
        }
        self.handle.release();
    }
}

impl<D: Driver> Drop for Renderer<D> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<D: Driver> fmt::Debug for Renderer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("raw", &self.handle.get())
            .finish()
    }
}
