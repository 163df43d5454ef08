use std::collections::HashMap;
use std::ffi::{CString, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use parking_lot::Mutex;
use purrr_sys as sys;

use crate::error::ResultCode;
use crate::input::{Action, Key, KeyModifiers, MouseButton};
use crate::window::{
    CursorEnterCallback, CursorLeaveCallback, CursorMoveCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback, WindowCallbacks, WindowCreateInfo,
};

use super::{Driver, RawImage, RawRenderer, RawWindow};

/// Driver backed by libpurrr.
///
/// Native callbacks are registered as `extern "C"` trampolines with the
/// library's exact signatures; the trampolines look the typed Rust callback
/// up by window address and call it with a borrowed `Window`.
#[derive(Debug, Copy, Clone, Default)]
pub struct NativeDriver;

/// Rust callbacks per live native window, keyed by handle address.
static CALLBACKS: LazyLock<Mutex<HashMap<usize, WindowCallbacks<NativeDriver>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn callbacks_for(window: sys::Purrr_Window) -> WindowCallbacks<NativeDriver> {
    CALLBACKS
        .lock()
        .get(&window.addr())
        .copied()
        .unwrap_or_default()
}

fn update_callbacks(window: RawWindow, f: impl FnOnce(&mut WindowCallbacks<NativeDriver>)) {
    let mut table = CALLBACKS.lock();
    f(table.entry(window.addr()).or_default());
}

fn forget_callbacks(window: RawWindow) {
    CALLBACKS.lock().remove(&window.addr());
}

// ── Trampolines ───────────────────────────────────────────────────────────
//
// The registry lock is released (by `callbacks_for`) before any user code runs.
// A panic must not unwind into C, so user code runs under `guarded`.

fn guarded(what: &str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        let msg = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string payload");
        log::error!("{what} callback panicked: {msg}");
    }
}

unsafe extern "C" fn key_trampoline(
    window: sys::Purrr_Window,
    scancode: i16,
    key: sys::Purrr_Key,
    action: sys::Purrr_Action,
    modifiers: sys::Purrr_Key_Modifiers,
) {
    let (Ok(key), Ok(action)) = (Key::try_from(key), Action::try_from(action)) else {
        log::trace!("dropping key event with unknown key {key} or action {action}");
        return;
    };
    guarded("key", || {
        callbacks_for(window).dispatch_key(
            RawWindow::from_ptr(window),
            &NativeDriver,
            scancode,
            key,
            action,
            KeyModifiers::from_bits_retain(modifiers),
        )
    });
}

unsafe extern "C" fn cursor_move_trampoline(window: sys::Purrr_Window, x: f64, y: f64) {
    guarded("cursor move", || {
        callbacks_for(window).dispatch_cursor_move(RawWindow::from_ptr(window), &NativeDriver, x, y)
    });
}

unsafe extern "C" fn cursor_enter_trampoline(window: sys::Purrr_Window) {
    guarded("cursor enter", || {
        callbacks_for(window).dispatch_cursor_enter(RawWindow::from_ptr(window), &NativeDriver)
    });
}

unsafe extern "C" fn cursor_leave_trampoline(window: sys::Purrr_Window) {
    guarded("cursor leave", || {
        callbacks_for(window).dispatch_cursor_leave(RawWindow::from_ptr(window), &NativeDriver)
    });
}

unsafe extern "C" fn scroll_trampoline(window: sys::Purrr_Window, dx: f64, dy: f64) {
    guarded("scroll", || {
        callbacks_for(window).dispatch_scroll(RawWindow::from_ptr(window), &NativeDriver, dx, dy)
    });
}

unsafe extern "C" fn mouse_button_trampoline(
    window: sys::Purrr_Window,
    button: sys::Purrr_Mouse_Button,
    action: sys::Purrr_Action,
    modifiers: sys::Purrr_Key_Modifiers,
) {
    let (Ok(button), Ok(action)) = (MouseButton::try_from(button), Action::try_from(action))
    else {
        log::trace!("dropping mouse event with unknown button {button} or action {action}");
        return;
    };
    guarded("mouse button", || {
        callbacks_for(window).dispatch_mouse_button(
            RawWindow::from_ptr(window),
            &NativeDriver,
            button,
            action,
            KeyModifiers::from_bits_retain(modifiers),
        )
    });
}

impl Driver for NativeDriver {
    fn create_renderer(&self, renderer: &mut RawRenderer) -> ResultCode {
        let mut raw: sys::Purrr_Renderer = std::ptr::null_mut();
        // SAFETY: `raw` is a valid out-pointer for the duration of the call.
        let code = ResultCode(unsafe { sys::purrr_create_renderer(&mut raw) });
        *renderer = RawRenderer::from_ptr(raw);
        code
    }

    fn destroy_renderer(&self, renderer: RawRenderer) {
        // SAFETY: the owning wrapper calls this once per live handle.
        unsafe { sys::purrr_destroy_renderer(renderer.as_ptr()) }
    }

    fn create_window(
        &self,
        renderer: RawRenderer,
        create_info: &WindowCreateInfo,
        window: &mut RawWindow,
    ) -> ResultCode {
        let Ok(title) = CString::new(create_info.title.as_str()) else {
            log::warn!("window title contains a NUL byte: {:?}", create_info.title);
            return ResultCode::INVALID_ARGS;
        };
        let (Ok(width), Ok(height)) = (
            i32::try_from(create_info.width),
            i32::try_from(create_info.height),
        ) else {
            return ResultCode::INVALID_ARGS;
        };

        let info = sys::Purrr_Window_Create_Info {
            title: title.as_ptr(),
            width,
            height,
            depth: create_info.depth,
        };
        let mut raw: sys::Purrr_Window = std::ptr::null_mut();
        // SAFETY: `title` outlives the call; `raw` is a valid out-pointer.
        let code = ResultCode(unsafe { sys::purrr_create_window(renderer.as_ptr(), info, &mut raw) });
        *window = RawWindow::from_ptr(raw);
        code
    }

    fn destroy_window(&self, window: RawWindow) {
        forget_callbacks(window);
        // SAFETY: the owning wrapper calls this once per live handle.
        unsafe { sys::purrr_destroy_window(window.as_ptr()) }
    }

    fn window_image(&self, window: RawWindow, image: &mut RawImage) -> ResultCode {
        let mut raw: sys::Purrr_Image = std::ptr::null_mut();
        // SAFETY: `window` is live; `raw` is a valid out-pointer.
        let code = ResultCode(unsafe { sys::purrr_get_window_image(window.as_ptr(), &mut raw) });
        *image = RawImage::from_ptr(raw);
        code
    }

    fn should_window_close(&self, window: RawWindow) -> bool {
        // SAFETY: `window` is live.
        unsafe { sys::purrr_should_window_close(window.as_ptr()) }
    }

    fn window_size(&self, window: RawWindow, width: &mut i32, height: &mut i32) -> ResultCode {
        // SAFETY: `window` is live; both out-pointers are valid.
        ResultCode(unsafe { sys::purrr_get_window_size(window.as_ptr(), width, height) })
    }

    fn is_key_down(&self, window: RawWindow, key: Key) -> ResultCode {
        // SAFETY: `window` is live.
        ResultCode(unsafe { sys::purrr_is_window_key_down(window.as_ptr(), key.code()) })
    }

    fn is_key_up(&self, window: RawWindow, key: Key) -> ResultCode {
        // SAFETY: `window` is live.
        ResultCode(unsafe { sys::purrr_is_window_key_up(window.as_ptr(), key.code()) })
    }

    fn is_mouse_button_down(&self, window: RawWindow, button: MouseButton) -> ResultCode {
        // SAFETY: `window` is live.
        ResultCode(unsafe {
            sys::purrr_is_window_mouse_button_down(window.as_ptr(), button.code())
        })
    }

    fn is_mouse_button_up(&self, window: RawWindow, button: MouseButton) -> ResultCode {
        // SAFETY: `window` is live.
        ResultCode(unsafe { sys::purrr_is_window_mouse_button_up(window.as_ptr(), button.code()) })
    }

    fn cursor_pos(&self, window: RawWindow, x: &mut f64, y: &mut f64) -> ResultCode {
        // SAFETY: `window` is live; both out-pointers are valid.
        ResultCode(unsafe { sys::purrr_get_window_cursor_pos(window.as_ptr(), x, y) })
    }

    fn set_cursor_pos(&self, window: RawWindow, x: f64, y: f64) -> ResultCode {
        // SAFETY: `window` is live.
        ResultCode(unsafe { sys::purrr_set_window_cursor_pos(window.as_ptr(), x, y) })
    }

    fn set_key_callback(&self, window: RawWindow, cb: Option<KeyCallback<Self>>) {
        update_callbacks(window, |t| t.key = cb);
        let native: sys::Purrr_Window_Key_Callback = match cb {
            Some(_) => Some(key_trampoline),
            None => None,
        };
        // SAFETY: `window` is live; the trampoline matches the native signature.
        unsafe { sys::purrr_set_window_key_callback(window.as_ptr(), native) }
    }

    fn set_cursor_move_callback(&self, window: RawWindow, cb: Option<CursorMoveCallback<Self>>) {
        update_callbacks(window, |t| t.cursor_move = cb);
        let native: sys::Purrr_Window_Cursor_Move_Callback = match cb {
            Some(_) => Some(cursor_move_trampoline),
            None => None,
        };
        // SAFETY: as above.
        unsafe { sys::purrr_set_window_cursor_move_callback(window.as_ptr(), native) }
    }

    fn set_cursor_enter_callback(&self, window: RawWindow, cb: Option<CursorEnterCallback<Self>>) {
        update_callbacks(window, |t| t.cursor_enter = cb);
        let native: sys::Purrr_Window_Cursor_Enter_Callback = match cb {
            Some(_) => Some(cursor_enter_trampoline),
            None => None,
        };
        // SAFETY: as above.
        unsafe { sys::purrr_set_window_cursor_enter_callback(window.as_ptr(), native) }
    }

    fn set_cursor_leave_callback(&self, window: RawWindow, cb: Option<CursorLeaveCallback<Self>>) {
        update_callbacks(window, |t| t.cursor_leave = cb);
        let native: sys::Purrr_Window_Cursor_Leave_Callback = match cb {
            Some(_) => Some(cursor_leave_trampoline),
            None => None,
        };
        // SAFETY: as above.
        unsafe { sys::purrr_set_window_cursor_leave_callback(window.as_ptr(), native) }
    }

    fn set_scroll_callback(&self, window: RawWindow, cb: Option<ScrollCallback<Self>>) {
        update_callbacks(window, |t| t.scroll = cb);
        let native: sys::Purrr_Window_Scroll_Callback = match cb {
            Some(_) => Some(scroll_trampoline),
            None => None,
        };
        // SAFETY: as above.
        unsafe { sys::purrr_set_window_scroll_callback(window.as_ptr(), native) }
    }

    fn set_mouse_button_callback(&self, window: RawWindow, cb: Option<MouseButtonCallback<Self>>) {
        update_callbacks(window, |t| t.mouse_button = cb);
        let native: sys::Purrr_Window_Mouse_Button_Callback = match cb {
            Some(_) => Some(mouse_button_trampoline),
            None => None,
        };
        // SAFETY: as above.
        unsafe { sys::purrr_set_window_mouse_button_callback(window.as_ptr(), native) }
    }

    fn set_user_pointer(&self, window: RawWindow, user_pointer: *mut c_void) {
        // SAFETY: `window` is live; the library stores the pointer opaquely.
        unsafe { sys::purrr_set_window_user_pointer(window.as_ptr(), user_pointer) }
    }

    fn user_pointer(&self, window: RawWindow) -> *mut c_void {
        // SAFETY: `window` is live.
        unsafe { sys::purrr_get_window_user_pointer(window.as_ptr()) }
    }

    fn time(&self) -> f64 {
        // SAFETY: no arguments; process-wide query.
        unsafe { sys::purrr_get_windows_time() }
    }

    fn poll(&self) {
        // SAFETY: no arguments; callbacks re-enter through the trampolines.
        unsafe { sys::purrr_poll_windows() }
    }

    fn wait(&self) {
        // SAFETY: as `poll`.
        unsafe { sys::purrr_wait_windows() }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::window::Window;

    // The registry is process-wide; each test uses its own window address.

    thread_local! {
        static SEEN: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn seen() -> Vec<String> {
        SEEN.with(|s| s.borrow_mut().drain(..).collect())
    }

    fn on_key(w: &Window<NativeDriver>, scancode: i16, key: Key, action: Action, mods: KeyModifiers) {
        let addr = w.raw().map_or(0, RawWindow::addr);
        SEEN.with(|s| {
            s.borrow_mut()
                .push(format!("{addr:#x} key {scancode} {key} {action:?} {:?}", mods.bits()))
        });
    }

    fn on_button(w: &Window<NativeDriver>, button: MouseButton, action: Action, _: KeyModifiers) {
        let addr = w.raw().map_or(0, RawWindow::addr);
        SEEN.with(|s| s.borrow_mut().push(format!("{addr:#x} button {button:?} {action:?}")));
    }

    fn on_scroll(_: &Window<NativeDriver>, _: f64, _: f64) {
        panic!("scroll handler failed");
    }

    fn on_enter(_: &Window<NativeDriver>) {
        SEEN.with(|s| s.borrow_mut().push("enter".into()));
    }

    #[test]
    fn key_events_reach_the_registered_callback() {
        let window = RawWindow::from_addr(0x1_0000);
        update_callbacks(window, |t| t.key = Some(on_key));

        // SAFETY: the trampoline only touches the registry and the callback.
        unsafe {
            key_trampoline(
                window.as_ptr(),
                38,
                Key::A.code(),
                sys::PURRR_ACTION_PRESS,
                KeyModifiers::SHIFT.bits(),
            )
        };
        assert_eq!(seen(), vec!["0x10000 key 38 A Press 1".to_string()]);
        forget_callbacks(window);
    }

    #[test]
    fn unknown_codes_are_dropped() {
        let window = RawWindow::from_addr(0x2_0000);
        update_callbacks(window, |t| {
            t.key = Some(on_key);
            t.mouse_button = Some(on_button);
        });

        // SAFETY: as above.
        unsafe {
            key_trampoline(window.as_ptr(), 0, 9999, sys::PURRR_ACTION_PRESS, 0);
            key_trampoline(window.as_ptr(), 0, Key::A.code(), 42, 0);
            mouse_button_trampoline(window.as_ptr(), 7, sys::PURRR_ACTION_PRESS, 0);
            mouse_button_trampoline(window.as_ptr(), MouseButton::Left.code(), -1, 0);
        }
        assert!(seen().is_empty());

        // SAFETY: as above.
        unsafe {
            mouse_button_trampoline(
                window.as_ptr(),
                MouseButton::Right.code(),
                sys::PURRR_ACTION_RELEASE,
                0,
            )
        };
        assert_eq!(seen(), vec!["0x20000 button Right Release".to_string()]);
        forget_callbacks(window);
    }

    #[test]
    fn callbacks_are_looked_up_by_window() {
        let registered = RawWindow::from_addr(0x3_0000);
        let other = RawWindow::from_addr(0x3_0010);
        update_callbacks(registered, |t| t.cursor_enter = Some(on_enter));

        // SAFETY: as above.
        unsafe {
            cursor_enter_trampoline(other.as_ptr());
            cursor_enter_trampoline(registered.as_ptr());
        }
        assert_eq!(seen(), vec!["enter".to_string()]);
        forget_callbacks(registered);
    }

    #[test]
    fn unregistering_and_forgetting_stop_delivery() {
        let window = RawWindow::from_addr(0x4_0000);
        update_callbacks(window, |t| t.cursor_enter = Some(on_enter));
        update_callbacks(window, |t| t.cursor_enter = None);

        // SAFETY: as above.
        unsafe { cursor_enter_trampoline(window.as_ptr()) };
        assert!(seen().is_empty());

        update_callbacks(window, |t| t.cursor_enter = Some(on_enter));
        forget_callbacks(window);
        assert!(!CALLBACKS.lock().contains_key(&window.addr()));

        // SAFETY: as above.
        unsafe { cursor_enter_trampoline(window.as_ptr()) };
        assert!(seen().is_empty());
    }

    #[test]
    fn panicking_callback_does_not_unwind_into_c() {
        let window = RawWindow::from_addr(0x5_0000);
        update_callbacks(window, |t| {
            t.scroll = Some(on_scroll);
            t.cursor_enter = Some(on_enter);
        });

        // SAFETY: as above.
        unsafe {
            scroll_trampoline(window.as_ptr(), 0.0, 1.0);
            cursor_enter_trampoline(window.as_ptr());
        }
        assert_eq!(seen(), vec!["enter".to_string()]);
        forget_callbacks(window);
    }
}
