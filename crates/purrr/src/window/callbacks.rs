use crate::driver::{Driver, RawWindow};
use crate::input::{Action, Key, KeyModifiers, MouseButton};

use super::wrapper::{Window, WindowView};

/// Key event: window, platform scancode, key, action, held modifiers.
pub type KeyCallback<D> = fn(&Window<D>, i16, Key, Action, KeyModifiers);
/// Cursor moved to (x, y) in window coordinates.
pub type CursorMoveCallback<D> = fn(&Window<D>, f64, f64);
pub type CursorEnterCallback<D> = fn(&Window<D>);
pub type CursorLeaveCallback<D> = fn(&Window<D>);
/// Scroll offset (dx, dy).
pub type ScrollCallback<D> = fn(&Window<D>, f64, f64);
pub type MouseButtonCallback<D> = fn(&Window<D>, MouseButton, Action, KeyModifiers);

/// Callbacks registered for one window.
///
/// Drivers keep one table per window and call the `dispatch_*` methods when
/// the library reports an event. The window passed to the callback is a
/// non-owning view of the handle.
///
/// `NativeDriver` runs callbacks from inside a C call. A panicking callback
/// is caught there and logged at error level; the event is lost and
/// processing continues with the next one. `MockDriver` lets the panic
/// propagate out of `poll`/`wait`.
pub struct WindowCallbacks<D: Driver> {
    pub key: Option<KeyCallback<D>>,
    pub cursor_move: Option<CursorMoveCallback<D>>,
    pub cursor_enter: Option<CursorEnterCallback<D>>,
    pub cursor_leave: Option<CursorLeaveCallback<D>>,
    pub scroll: Option<ScrollCallback<D>>,
    pub mouse_button: Option<MouseButtonCallback<D>>,
}

impl<D: Driver> WindowCallbacks<D> {
    pub fn dispatch_key(
        &self,
        window: RawWindow,
        driver: &D,
        scancode: i16,
        key: Key,
        action: Action,
        modifiers: KeyModifiers,
    ) {
        if let Some(cb) = self.key {
            cb(&WindowView::new(window, driver), scancode, key, action, modifiers);
        }
    }

    pub fn dispatch_cursor_move(&self, window: RawWindow, driver: &D, x: f64, y: f64) {
        if let Some(cb) = self.cursor_move {
            cb(&WindowView::new(window, driver), x, y);
        }
    }

    pub fn dispatch_cursor_enter(&self, window: RawWindow, driver: &D) {
        if let Some(cb) = self.cursor_enter {
            cb(&WindowView::new(window, driver));
        }
    }

    pub fn dispatch_cursor_leave(&self, window: RawWindow, driver: &D) {
        if let Some(cb) = self.cursor_leave {
            cb(&WindowView::new(window, driver));
        }
    }

    pub fn dispatch_scroll(&self, window: RawWindow, driver: &D, dx: f64, dy: f64) {
        if let Some(cb) = self.scroll {
            cb(&WindowView::new(window, driver), dx, dy);
        }
    }

    pub fn dispatch_mouse_button(
        &self,
        window: RawWindow,
        driver: &D,
        button: MouseButton,
        action: Action,
        modifiers: KeyModifiers,
    ) {
        if let Some(cb) = self.mouse_button {
            cb(&WindowView::new(window, driver), button, action, modifiers);
        }
    }
}

// Manual impls: derives would demand `D: Default`/`D: Copy`.
impl<D: Driver> Default for WindowCallbacks<D> {
    fn default() -> Self {
        Self {
            key: None,
            cursor_move: None,
            cursor_enter: None,
            cursor_leave: None,
            scroll: None,
            mouse_button: None,
        }
    }
}

impl<D: Driver> Clone for WindowCallbacks<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Driver> Copy for WindowCallbacks<D> {}
