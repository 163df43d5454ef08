use std::ffi::c_void;
use std::fmt;
use std::ops::Deref;

use crate::driver::{Driver, RawImage, RawRenderer, RawWindow};
use crate::error::{Error, Result, ResultCode};
use crate::handle::Owned;
use crate::input::{Key, MouseButton};

use super::callbacks::{
    CursorEnterCallback, CursorLeaveCallback, CursorMoveCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback,
};
use super::config::WindowCreateInfo;
use super::image::Image;

/// An owned native window.
///
/// Created through [`Renderer::create_window`](crate::Renderer::create_window).
/// Dropping the window destroys it; [`Window::take`] and [`Window::into_raw`]
/// move ownership elsewhere first.
///
/// Every query forwards to the driver. A failing native call surfaces as
/// [`Error::NativeCall`]; so does any fallible call on a window that no
/// longer owns a handle, without reaching the driver.
pub struct Window<D: Driver> {
    handle: Owned<RawWindow, D>,
}

impl<D: Driver> Window<D> {
    pub(crate) fn create(
        renderer: RawRenderer,
        driver: D,
        create_info: &WindowCreateInfo,
    ) -> Result<Self> {
        let mut raw = RawWindow::NULL;
        driver
            .create_window(renderer, create_info, &mut raw)
            .check("purrr_create_window")?;

        log::debug!(
            "window created: {:?} \"{}\" {}x{}",
            raw,
            create_info.title,
            create_info.width,
            create_info.height
        );

        Ok(Self {
            handle: Owned::new(raw, driver),
        })
    }

    /// Adopts an existing native window.
    ///
    /// # Safety
    /// `raw` must be a live window created by the library behind `driver`,
    /// and nothing else may destroy it: the returned value will.
    pub unsafe fn from_raw(raw: RawWindow, driver: D) -> Self {
        Self {
            handle: Owned::new(raw, driver),
        }
    }

    /// A window that owns nothing. Every fallible call on it fails.
    pub fn empty(driver: D) -> Self {
        Self {
            handle: Owned::empty(driver),
        }
    }

    #[inline]
    pub fn raw(&self) -> Option<RawWindow> {
        self.handle.get()
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.handle.is_live()
    }

    #[inline]
    pub fn driver(&self) -> &D {
        self.handle.driver()
    }

    fn live(&self, op: &'static str) -> Result<RawWindow> {
        self.handle.get().ok_or_else(|| {
            log::debug!("{op} on a window without a handle");
            Error::NativeCall {
                op,
                code: ResultCode::INVALID_ARGS,
            }
        })
    }

    pub fn image(&self) -> Result<Image<'_>> {
        let raw = self.live("purrr_get_window_image")?;
        let mut image = RawImage::NULL;
        self.driver()
            .window_image(raw, &mut image)
            .check("purrr_get_window_image")?;
        Ok(Image::new(image))
    }

    /// Whether the user asked to close the window. A window without a handle
    /// always should.
    pub fn should_close(&self) -> bool {
        match self.handle.get() {
            Some(raw) => self.driver().should_window_close(raw),
            None => true,
        }
    }

    /// Current size as `(width, height)`.
    pub fn size(&self) -> Result<(i32, i32)> {
        let raw = self.live("purrr_get_window_size")?;
        let (mut width, mut height) = (0, 0);
        self.driver()
            .window_size(raw, &mut width, &mut height)
            .check("purrr_get_window_size")?;
        Ok((width, height))
    }

    pub fn is_key_down(&self, key: Key) -> Result<bool> {
        let raw = self.live("purrr_is_window_key_down")?;
        let code = self
            .driver()
            .is_key_down(raw, key)
            .check("purrr_is_window_key_down")?;
        Ok(code.is_true())
    }

    pub fn is_key_up(&self, key: Key) -> Result<bool> {
        let raw = self.live("purrr_is_window_key_up")?;
        let code = self
            .driver()
            .is_key_up(raw, key)
            .check("purrr_is_window_key_up")?;
        Ok(code.is_true())
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> Result<bool> {
        let raw = self.live("purrr_is_window_mouse_button_down")?;
        let code = self
            .driver()
            .is_mouse_button_down(raw, button)
            .check("purrr_is_window_mouse_button_down")?;
        Ok(code.is_true())
    }

    pub fn is_mouse_button_up(&self, button: MouseButton) -> Result<bool> {
        let raw = self.live("purrr_is_window_mouse_button_up")?;
        let code = self
            .driver()
            .is_mouse_button_up(raw, button)
            .check("purrr_is_window_mouse_button_up")?;
        Ok(code.is_true())
    }

    /// Cursor position as `(x, y)` in window coordinates.
    pub fn cursor_pos(&self) -> Result<(f64, f64)> {
        let raw = self.live("purrr_get_window_cursor_pos")?;
        let (mut x, mut y) = (0.0, 0.0);
        self.driver()
            .cursor_pos(raw, &mut x, &mut y)
            .check("purrr_get_window_cursor_pos")?;
        Ok((x, y))
    }

    pub fn set_cursor_pos(&self, x: f64, y: f64) -> Result<()> {
        let raw = self.live("purrr_set_window_cursor_pos")?;
        self.driver()
            .set_cursor_pos(raw, x, y)
            .check("purrr_set_window_cursor_pos")?;
        Ok(())
    }

    // ── Callbacks ─────────────────────────────────────────────────────────
    //
    // The native setters return nothing; on a window without a handle the
    // registration is dropped.

    fn with_live(&self, what: &str, f: impl FnOnce(&D, RawWindow)) {
        match self.handle.get() {
            Some(raw) => f(self.driver(), raw),
            None => log::warn!("ignoring {what} on a window without a handle"),
        }
    }

    pub fn set_key_callback(&self, cb: Option<KeyCallback<D>>) {
        self.with_live("key callback", |d, raw| d.set_key_callback(raw, cb));
    }

    pub fn set_cursor_move_callback(&self, cb: Option<CursorMoveCallback<D>>) {
        self.with_live("cursor move callback", |d, raw| {
            d.set_cursor_move_callback(raw, cb)
        });
    }

    pub fn set_cursor_enter_callback(&self, cb: Option<CursorEnterCallback<D>>) {
        self.with_live("cursor enter callback", |d, raw| {
            d.set_cursor_enter_callback(raw, cb)
        });
    }

    pub fn set_cursor_leave_callback(&self, cb: Option<CursorLeaveCallback<D>>) {
        self.with_live("cursor leave callback", |d, raw| {
            d.set_cursor_leave_callback(raw, cb)
        });
    }

    pub fn set_scroll_callback(&self, cb: Option<ScrollCallback<D>>) {
        self.with_live("scroll callback", |d, raw| d.set_scroll_callback(raw, cb));
    }

    pub fn set_mouse_button_callback(&self, cb: Option<MouseButtonCallback<D>>) {
        self.with_live("mouse button callback", |d, raw| {
            d.set_mouse_button_callback(raw, cb)
        });
    }

    /// Attaches an arbitrary pointer to the window, retrievable from callbacks.
    pub fn set_user_pointer(&self, user_pointer: *mut c_void) {
        self.with_live("user pointer", |d, raw| d.set_user_pointer(raw, user_pointer));
    }

    pub fn user_pointer(&self) -> *mut c_void {
        match self.handle.get() {
            Some(raw) => self.driver().user_pointer(raw),
            None => std::ptr::null_mut(),
        }
    }

    // ── Ownership ─────────────────────────────────────────────────────────

    /// Moves the handle into a new `Window`, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            handle: self.handle.take(),
        }
    }

    /// Gives up ownership without destroying the window.
    pub fn into_raw(mut self) -> Option<RawWindow> {
        self.handle.disown()
    }

    /// Destroys the native window now. Later calls, and the eventual drop,
    /// do nothing.
    pub fn destroy(&mut self) {
        if let Some(raw) = self.handle.get() {
            log::debug!("window destroyed: {:?}", raw);
        }
        self.handle.release();
    }
}

impl<D: Driver> Drop for Window<D> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<D: Driver> fmt::Debug for Window<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("raw", &self.handle.get())
            .finish()
    }
}

/// Borrowed window handed to callbacks. Never destroys the handle.
pub(crate) struct WindowView<D: Driver>(Window<D>);

impl<D: Driver> WindowView<D> {
    pub(crate) fn new(raw: RawWindow, driver: &D) -> Self {
        Self(Window {
            handle: Owned::new(raw, driver.clone()),
        })
    }
}

impl<D: Driver> Deref for WindowView<D> {
    type Target = Window<D>;

    fn deref(&self) -> &Window<D> {
        &self.0
    }
}

impl<D: Driver> Drop for WindowView<D> {
    fn drop(&mut self) {
        self.0.handle.disown();
    }
}
