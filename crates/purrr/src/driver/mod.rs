//! The native function table, as a trait.
//!
//! `Driver` has one method per `purrr_` function and speaks the same raw
//! vocabulary: bare handles, out-parameters and result codes. The wrapper
//! types in this crate are the only callers; they own the handles and turn
//! codes into errors.
//!
//! Two implementations exist:
//! - `NativeDriver` (feature `native`) forwards to libpurrr
//! - `MockDriver` simulates the library in-process

mod mock;
#[cfg(feature = "native")]
mod native;
mod raw;

use std::ffi::c_void;

pub use mock::MockDriver;
#[cfg(feature = "native")]
pub use native::NativeDriver;
pub use raw::{RawImage, RawRenderer, RawWindow};

use crate::error::ResultCode;
use crate::input::{Key, MouseButton};
use crate::window::{
    CursorEnterCallback, CursorLeaveCallback, CursorMoveCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback, WindowCreateInfo,
};

/// Backend the wrapper types forward to.
///
/// Implementations are cheap handles (`Clone`) onto one process-wide library
/// instance. Every wrapper keeps its own clone.
pub trait Driver: Clone + Sized + 'static {
    fn create_renderer(&self, renderer: &mut RawRenderer) -> ResultCode;
    fn destroy_renderer(&self, renderer: RawRenderer);

    fn create_window(
        &self,
        renderer: RawRenderer,
        create_info: &WindowCreateInfo,
        window: &mut RawWindow,
    ) -> ResultCode;
    fn destroy_window(&self, window: RawWindow);

    fn window_image(&self, window: RawWindow, image: &mut RawImage) -> ResultCode;
    fn should_window_close(&self, window: RawWindow) -> bool;
    fn window_size(&self, window: RawWindow, width: &mut i32, height: &mut i32) -> ResultCode;

    fn is_key_down(&self, window: RawWindow, key: Key) -> ResultCode;
    fn is_key_up(&self, window: RawWindow, key: Key) -> ResultCode;
    fn is_mouse_button_down(&self, window: RawWindow, button: MouseButton) -> ResultCode;
    fn is_mouse_button_up(&self, window: RawWindow, button: MouseButton) -> ResultCode;

    fn cursor_pos(&self, window: RawWindow, x: &mut f64, y: &mut f64) -> ResultCode;
    fn set_cursor_pos(&self, window: RawWindow, x: f64, y: f64) -> ResultCode;

    fn set_key_callback(&self, window: RawWindow, cb: Option<KeyCallback<Self>>);
    fn set_cursor_move_callback(&self, window: RawWindow, cb: Option<CursorMoveCallback<Self>>);
    fn set_cursor_enter_callback(&self, window: RawWindow, cb: Option<CursorEnterCallback<Self>>);
    fn set_cursor_leave_callback(&self, window: RawWindow, cb: Option<CursorLeaveCallback<Self>>);
    fn set_scroll_callback(&self, window: RawWindow, cb: Option<ScrollCallback<Self>>);
    fn set_mouse_button_callback(&self, window: RawWindow, cb: Option<MouseButtonCallback<Self>>);

    fn set_user_pointer(&self, window: RawWindow, user_pointer: *mut c_void);
    fn user_pointer(&self, window: RawWindow) -> *mut c_void;

    /// Seconds since the library was initialized.
    fn time(&self) -> f64;
    /// Processes pending events without blocking.
    fn poll(&self);
    /// Blocks until at least one event is available, then processes events.
    fn wait(&self);
}
