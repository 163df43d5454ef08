//! Raw C declarations for the purrr windowing/rendering library.
//!
//! Everything here mirrors the C header one-to-one: opaque handle types,
//! integer result codes, enum values as constants, callback signatures and the
//! `extern "C"` function table.
//!
//! ## Linking
//!
//! The `link` feature emits `-lpurrr`. Without it the declarations still
//! compile, and nothing is linked until a function is actually referenced.
//!
//! ## Safety
//!
//! All functions are unsafe to call. Prefer the `purrr` crate, which wraps
//! the handles in owning types and turns result codes into errors.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_void};
use std::marker::{PhantomData, PhantomPinned};

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident, $target:ident) => {
        #[repr(C)]
        pub struct $target {
            _data: [u8; 0],
            _marker: PhantomData<(*mut u8, PhantomPinned)>,
        }

        $(#[$meta])*
        pub type $name = *mut $target;
    };
}

opaque_handle!(
    /// Renderer handle. Owns the device every window draws through.
    Purrr_Renderer,
    Purrr_Renderer_T
);
opaque_handle!(
    /// Window handle.
    Purrr_Window,
    Purrr_Window_T
);
opaque_handle!(
    /// Image handle. Window images belong to their window.
    Purrr_Image,
    Purrr_Image_T
);

/// Untyped handle, used where the C API accepts any handle kind.
pub type Purrr_Handle = *mut c_void;

pub const PURRR_NULL_HANDLE: *mut c_void = std::ptr::null_mut();

// ── Result codes ──────────────────────────────────────────────────────────

pub type Purrr_Result = i32;

pub const PURRR_SUCCESS: Purrr_Result = 0;
pub const PURRR_TRUE: Purrr_Result = 1;
pub const PURRR_INVALID_ARGS_ERROR: Purrr_Result = -1;
pub const PURRR_INTERNAL_ERROR: Purrr_Result = -2;
pub const PURRR_OUT_OF_MEMORY: Purrr_Result = -3;
pub const PURRR_NOT_IMPLEMENTED: Purrr_Result = -4;

// ── Input encodings ───────────────────────────────────────────────────────

/// Key code. Printable keys use their ASCII value.
pub type Purrr_Key = c_int;

pub type Purrr_Action = c_int;

pub const PURRR_ACTION_RELEASE: Purrr_Action = 0;
pub const PURRR_ACTION_PRESS: Purrr_Action = 1;
pub const PURRR_ACTION_REPEAT: Purrr_Action = 2;

pub type Purrr_Mouse_Button = c_int;

/// Modifier bitset: shift, control, alt, super, caps lock, num lock from bit 0.
pub type Purrr_Key_Modifiers = u8;

// ── Creation parameters ───────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Purrr_Window_Create_Info {
    pub title: *const c_char,
    pub width: c_int,
    pub height: c_int,
    pub depth: bool,
}

// ── Callbacks ─────────────────────────────────────────────────────────────

pub type Purrr_Window_Key_Callback = Option<
    unsafe extern "C" fn(
        window: Purrr_Window,
        scancode: i16,
        key: Purrr_Key,
        action: Purrr_Action,
        modifiers: Purrr_Key_Modifiers,
    ),
>;
pub type Purrr_Window_Cursor_Move_Callback =
    Option<unsafe extern "C" fn(window: Purrr_Window, x: f64, y: f64)>;
pub type Purrr_Window_Cursor_Enter_Callback = Option<unsafe extern "C" fn(window: Purrr_Window)>;
pub type Purrr_Window_Cursor_Leave_Callback = Option<unsafe extern "C" fn(window: Purrr_Window)>;
pub type Purrr_Window_Scroll_Callback =
    Option<unsafe extern "C" fn(window: Purrr_Window, dx: f64, dy: f64)>;
pub type Purrr_Window_Mouse_Button_Callback = Option<
    unsafe extern "C" fn(
        window: Purrr_Window,
        button: Purrr_Mouse_Button,
        action: Purrr_Action,
        modifiers: Purrr_Key_Modifiers,
    ),
>;

// ── Functions ─────────────────────────────────────────────────────────────

#[cfg_attr(feature = "link", link(name = "purrr"))]
unsafe extern "C" {
    pub fn purrr_create_renderer(renderer: *mut Purrr_Renderer) -> Purrr_Result;
    pub fn purrr_destroy_renderer(renderer: Purrr_Renderer);

    pub fn purrr_create_window(
        renderer: Purrr_Renderer,
        create_info: Purrr_Window_Create_Info,
        window: *mut Purrr_Window,
    ) -> Purrr_Result;
    pub fn purrr_destroy_window(window: Purrr_Window);

    pub fn purrr_get_window_image(window: Purrr_Window, image: *mut Purrr_Image) -> Purrr_Result;
    pub fn purrr_should_window_close(window: Purrr_Window) -> bool;
    pub fn purrr_get_window_size(
        window: Purrr_Window,
        width: *mut c_int,
        height: *mut c_int,
    ) -> Purrr_Result;

    pub fn purrr_is_window_key_down(window: Purrr_Window, key: Purrr_Key) -> Purrr_Result;
    pub fn purrr_is_window_key_up(window: Purrr_Window, key: Purrr_Key) -> Purrr_Result;
    pub fn purrr_is_window_mouse_button_down(
        window: Purrr_Window,
        button: Purrr_Mouse_Button,
    ) -> Purrr_Result;
    pub fn purrr_is_window_mouse_button_up(
        window: Purrr_Window,
        button: Purrr_Mouse_Button,
    ) -> Purrr_Result;

    pub fn purrr_get_window_cursor_pos(
        window: Purrr_Window,
        x: *mut f64,
        y: *mut f64,
    ) -> Purrr_Result;
    pub fn purrr_set_window_cursor_pos(window: Purrr_Window, x: f64, y: f64) -> Purrr_Result;

    pub fn purrr_set_window_key_callback(window: Purrr_Window, cb: Purrr_Window_Key_Callback);
    pub fn purrr_set_window_cursor_move_callback(
        window: Purrr_Window,
        cb: Purrr_Window_Cursor_Move_Callback,
    );
    pub fn purrr_set_window_cursor_enter_callback(
        window: Purrr_Window,
        cb: Purrr_Window_Cursor_Enter_Callback,
    );
    pub fn purrr_set_window_cursor_leave_callback(
        window: Purrr_Window,
        cb: Purrr_Window_Cursor_Leave_Callback,
    );
    pub fn purrr_set_window_scroll_callback(
        window: Purrr_Window,
        cb: Purrr_Window_Scroll_Callback,
    );
    pub fn purrr_set_window_mouse_button_callback(
        window: Purrr_Window,
        cb: Purrr_Window_Mouse_Button_Callback,
    );

    pub fn purrr_set_window_user_pointer(window: Purrr_Window, user_pointer: *mut c_void);
    pub fn purrr_get_window_user_pointer(window: Purrr_Window) -> *mut c_void;

    pub fn purrr_get_windows_time() -> f64;
    pub fn purrr_poll_windows();
    pub fn purrr_wait_windows();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_info_matches_c_layout() {
        let ptr = std::mem::size_of::<*const c_char>();
        // pointer, two ints, bool, padded to pointer alignment
        assert_eq!(std::mem::align_of::<Purrr_Window_Create_Info>(), ptr);
        assert!(std::mem::size_of::<Purrr_Window_Create_Info>() >= ptr + 2 * 4 + 1);
    }
}
