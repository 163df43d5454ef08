use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::c_void;
use std::rc::Rc;

use crate::error::ResultCode;
use crate::input::{Action, Key, KeyModifiers, MouseButton};
use crate::window::{
    CursorEnterCallback, CursorLeaveCallback, CursorMoveCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback, WindowCallbacks, WindowCreateInfo,
};

use super::{Driver, RawImage, RawRenderer, RawWindow};

/// In-process stand-in for libpurrr.
///
/// Windows are plain records; nothing is shown on screen. Input is queued
/// with the `queue_*` methods and delivered to callbacks on the next
/// `poll`/`wait`, the way the native library delivers events. The clock only
/// moves when told to.
///
/// Clones share state, so a test can keep one clone for inspection while
/// the wrappers own the others.
#[derive(Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<MockState>>,
}

#[derive(Default)]
struct MockState {
    last_addr: usize,
    renderers: HashSet<usize>,
    windows: HashMap<usize, MockWindow>,
    destroyed_renderers: Vec<RawRenderer>,
    destroyed_windows: Vec<RawWindow>,
    fail_next: Option<ResultCode>,
    time: f64,
    polls: u64,
    waits: u64,
    pending: VecDeque<MockEvent>,
}

impl MockState {
    fn mint(&mut self) -> usize {
        // Non-null and pointer-aligned, like a real allocation.
        self.last_addr += 0x10;
        self.last_addr
    }
}

struct MockWindow {
    renderer: RawRenderer,
    title: String,
    width: i32,
    height: i32,
    depth: bool,
    image: RawImage,
    should_close: bool,
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    cursor: (f64, f64),
    user_pointer: *mut c_void,
    callbacks: WindowCallbacks<MockDriver>,
}

enum MockEvent {
    Key {
        window: RawWindow,
        scancode: i16,
        key: Key,
        action: Action,
        modifiers: KeyModifiers,
    },
    MouseButton {
        window: RawWindow,
        button: MouseButton,
        action: Action,
        modifiers: KeyModifiers,
    },
    CursorMove {
        window: RawWindow,
        x: f64,
        y: f64,
    },
    CursorEnter(RawWindow),
    CursorLeave(RawWindow),
    Scroll {
        window: RawWindow,
        dx: f64,
        dy: f64,
    },
}

impl MockEvent {
    fn window(&self) -> RawWindow {
        match self {
            MockEvent::Key { window, .. }
            | MockEvent::MouseButton { window, .. }
            | MockEvent::CursorMove { window, .. }
            | MockEvent::Scroll { window, .. } => *window,
            MockEvent::CursorEnter(window) | MockEvent::CursorLeave(window) => *window,
        }
    }
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Failure injection ─────────────────────────────────────────────────

    /// Makes the next call that returns a result code return `code` instead.
    pub fn fail_next_call(&self, code: ResultCode) {
        self.state.borrow_mut().fail_next = Some(code);
    }

    fn injected(&self) -> Option<ResultCode> {
        self.state.borrow_mut().fail_next.take()
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn destroyed_renderers(&self) -> Vec<RawRenderer> {
        self.state.borrow().destroyed_renderers.clone()
    }

    pub fn destroyed_windows(&self) -> Vec<RawWindow> {
        self.state.borrow().destroyed_windows.clone()
    }

    /// How many times `purrr_destroy_renderer` saw this handle.
    pub fn renderer_destroy_count(&self, renderer: RawRenderer) -> usize {
        let state = self.state.borrow();
        state.destroyed_renderers.iter().filter(|r| **r == renderer).count()
    }

    /// How many times `purrr_destroy_window` saw this handle.
    pub fn window_destroy_count(&self, window: RawWindow) -> usize {
        let state = self.state.borrow();
        state.destroyed_windows.iter().filter(|w| **w == window).count()
    }

    pub fn live_windows(&self) -> usize {
        self.state.borrow().windows.len()
    }

    pub fn is_window_live(&self, window: RawWindow) -> bool {
        self.state.borrow().windows.contains_key(&window.addr())
    }

    pub fn window_title(&self, window: RawWindow) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&window.addr())
            .map(|w| w.title.clone())
    }

    pub fn window_depth(&self, window: RawWindow) -> Option<bool> {
        self.state.borrow().windows.get(&window.addr()).map(|w| w.depth)
    }

    pub fn window_renderer(&self, window: RawWindow) -> Option<RawRenderer> {
        self.state
            .borrow()
            .windows
            .get(&window.addr())
            .map(|w| w.renderer)
    }

    pub fn poll_count(&self) -> u64 {
        self.state.borrow().polls
    }

    pub fn wait_count(&self) -> u64 {
        self.state.borrow().waits
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().pending.len()
    }

    // ── Simulation ────────────────────────────────────────────────────────

    pub fn set_time(&self, seconds: f64) {
        self.state.borrow_mut().time = seconds;
    }

    pub fn advance_time(&self, seconds: f64) {
        self.state.borrow_mut().time += seconds;
    }

    /// Marks the window as asked to close by the user.
    pub fn request_close(&self, window: RawWindow) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window.addr()) {
            w.should_close = true;
        }
    }

    /// Resizes the window as if the user dragged its border.
    pub fn resize(&self, window: RawWindow, width: i32, height: i32) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window.addr()) {
            w.width = width;
            w.height = height;
        }
    }

    fn queue(&self, event: MockEvent) {
        self.state.borrow_mut().pending.push_back(event);
    }

    pub fn queue_key(
        &self,
        window: RawWindow,
        scancode: i16,
        key: Key,
        action: Action,
        modifiers: KeyModifiers,
    ) {
        self.queue(MockEvent::Key {
            window,
            scancode,
            key,
            action,
            modifiers,
        });
    }

    pub fn queue_mouse_button(
        &self,
        window: RawWindow,
        button: MouseButton,
        action: Action,
        modifiers: KeyModifiers,
    ) {
        self.queue(MockEvent::MouseButton {
            window,
            button,
            action,
            modifiers,
        });
    }

    pub fn queue_cursor_move(&self, window: RawWindow, x: f64, y: f64) {
        self.queue(MockEvent::CursorMove { window, x, y });
    }

    pub fn queue_cursor_enter(&self, window: RawWindow) {
        self.queue(MockEvent::CursorEnter(window));
    }

    pub fn queue_cursor_leave(&self, window: RawWindow) {
        self.queue(MockEvent::CursorLeave(window));
    }

    pub fn queue_scroll(&self, window: RawWindow, dx: f64, dy: f64) {
        self.queue(MockEvent::Scroll { window, dx, dy });
    }

    fn dispatch_pending(&self) {
        let events: Vec<MockEvent> = self.state.borrow_mut().pending.drain(..).collect();
        for event in events {
            self.deliver(event);
        }
    }

    /// Applies the event to the window record, then runs its callback with the
    /// state borrow released so the callback can query the driver.
    fn deliver(&self, event: MockEvent) {
        let raw = event.window();
        let callbacks = {
            let mut state = self.state.borrow_mut();
            let Some(w) = state.windows.get_mut(&raw.addr()) else {
                log::trace!("mock: dropping event for unknown window {:?}", raw);
                return;
            };

            match &event {
                MockEvent::Key { key, action, .. } => match action {
                    Action::Press | Action::Repeat => {
                        w.keys_down.insert(*key);
                    }
                    Action::Release => {
                        w.keys_down.remove(key);
                    }
                },
                MockEvent::MouseButton { button, action, .. } => match action {
                    Action::Press | Action::Repeat => {
                        w.buttons_down.insert(*button);
                    }
                    Action::Release => {
                        w.buttons_down.remove(button);
                    }
                },
                MockEvent::CursorMove { x, y, .. } => w.cursor = (*x, *y),
                MockEvent::CursorEnter(_) | MockEvent::CursorLeave(_) | MockEvent::Scroll { .. } => {}
            }

            w.callbacks
        };

        match event {
            MockEvent::Key {
                scancode,
                key,
                action,
                modifiers,
                ..
            } => callbacks.dispatch_key(raw, self, scancode, key, action, modifiers),
            MockEvent::MouseButton {
                button,
                action,
                modifiers,
                ..
            } => callbacks.dispatch_mouse_button(raw, self, button, action, modifiers),
            MockEvent::CursorMove { x, y, .. } => callbacks.dispatch_cursor_move(raw, self, x, y),
            MockEvent::CursorEnter(_) => callbacks.dispatch_cursor_enter(raw, self),
            MockEvent::CursorLeave(_) => callbacks.dispatch_cursor_leave(raw, self),
            MockEvent::Scroll { dx, dy, .. } => callbacks.dispatch_scroll(raw, self, dx, dy),
        }
    }

    fn with_window<T>(&self, window: RawWindow, f: impl FnOnce(&mut MockWindow) -> T) -> Option<T> {
        self.state.borrow_mut().windows.get_mut(&window.addr()).map(f)
    }

    /// Result-code query against a live window; unknown handles are invalid arguments.
    fn query(&self, window: RawWindow, f: impl FnOnce(&mut MockWindow) -> ResultCode) -> ResultCode {
        if let Some(code) = self.injected() {
            return code;
        }
        self.with_window(window, f).unwrap_or(ResultCode::INVALID_ARGS)
    }
}

fn truth(value: bool) -> ResultCode {
    if value { ResultCode::TRUE } else { ResultCode::SUCCESS }
}

impl Driver for MockDriver {
    fn create_renderer(&self, renderer: &mut RawRenderer) -> ResultCode {
        if let Some(code) = self.injected() {
            return code;
        }
        let mut state = self.state.borrow_mut();
        let addr = state.mint();
        state.renderers.insert(addr);
        *renderer = RawRenderer::from_addr(addr);
        ResultCode::SUCCESS
    }

    fn destroy_renderer(&self, renderer: RawRenderer) {
        let mut state = self.state.borrow_mut();
        if !state.renderers.remove(&renderer.addr()) {
            log::warn!("mock: destroying unknown renderer {:?}", renderer);
        }
        state.destroyed_renderers.push(renderer);
    }

    fn create_window(
        &self,
        renderer: RawRenderer,
        create_info: &WindowCreateInfo,
        window: &mut RawWindow,
    ) -> ResultCode {
        if let Some(code) = self.injected() {
            return code;
        }

        let (Ok(width), Ok(height)) = (
            i32::try_from(create_info.width),
            i32::try_from(create_info.height),
        ) else {
            return ResultCode::INVALID_ARGS;
        };
        // Same rule as the C boundary: the title must be a valid C string.
        if create_info.title.contains('\0') {
            return ResultCode::INVALID_ARGS;
        }

        let mut state = self.state.borrow_mut();
        if !state.renderers.contains(&renderer.addr()) {
            return ResultCode::INVALID_ARGS;
        }

        let addr = state.mint();
        let image = RawImage::from_addr(state.mint());
        state.windows.insert(
            addr,
            MockWindow {
                renderer,
                title: create_info.title.clone(),
                width,
                height,
                depth: create_info.depth,
                image,
                should_close: false,
                keys_down: HashSet::new(),
                buttons_down: HashSet::new(),
                cursor: (0.0, 0.0),
                user_pointer: std::ptr::null_mut(),
                callbacks: WindowCallbacks::default(),
            },
        );
        *window = RawWindow::from_addr(addr);
        ResultCode::SUCCESS
    }

    fn destroy_window(&self, window: RawWindow) {
        let mut state = self.state.borrow_mut();
        if state.windows.remove(&window.addr()).is_none() {
            log::warn!("mock: destroying unknown window {:?}", window);
        }
        state.destroyed_windows.push(window);
    }

    fn window_image(&self, window: RawWindow, image: &mut RawImage) -> ResultCode {
        self.query(window, |w| {
            *image = w.image;
            ResultCode::SUCCESS
        })
    }

    fn should_window_close(&self, window: RawWindow) -> bool {
        self.with_window(window, |w| w.should_close).unwrap_or(true)
    }

    fn window_size(&self, window: RawWindow, width: &mut i32, height: &mut i32) -> ResultCode {
        self.query(window, |w| {
            *width = w.width;
            *height = w.height;
            ResultCode::SUCCESS
        })
    }

    fn is_key_down(&self, window: RawWindow, key: Key) -> ResultCode {
        self.query(window, |w| truth(w.keys_down.contains(&key)))
    }

    fn is_key_up(&self, window: RawWindow, key: Key) -> ResultCode {
        self.query(window, |w| truth(!w.keys_down.contains(&key)))
    }

    fn is_mouse_button_down(&self, window: RawWindow, button: MouseButton) -> ResultCode {
        self.query(window, |w| truth(w.buttons_down.contains(&button)))
    }

    fn is_mouse_button_up(&self, window: RawWindow, button: MouseButton) -> ResultCode {
        self.query(window, |w| truth(!w.buttons_down.contains(&button)))
    }

    fn cursor_pos(&self, window: RawWindow, x: &mut f64, y: &mut f64) -> ResultCode {
        self.query(window, |w| {
            (*x, *y) = w.cursor;
            ResultCode::SUCCESS
        })
    }

    fn set_cursor_pos(&self, window: RawWindow, x: f64, y: f64) -> ResultCode {
        self.query(window, |w| {
            w.cursor = (x, y);
            ResultCode::SUCCESS
        })
    }

    fn set_key_callback(&self, window: RawWindow, cb: Option<KeyCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.key = cb);
    }

    fn set_cursor_move_callback(&self, window: RawWindow, cb: Option<CursorMoveCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.cursor_move = cb);
    }

    fn set_cursor_enter_callback(&self, window: RawWindow, cb: Option<CursorEnterCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.cursor_enter = cb);
    }

    fn set_cursor_leave_callback(&self, window: RawWindow, cb: Option<CursorLeaveCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.cursor_leave = cb);
    }

    fn set_scroll_callback(&self, window: RawWindow, cb: Option<ScrollCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.scroll = cb);
    }

    fn set_mouse_button_callback(&self, window: RawWindow, cb: Option<MouseButtonCallback<Self>>) {
        self.with_window(window, |w| w.callbacks.mouse_button = cb);
    }

    fn set_user_pointer(&self, window: RawWindow, user_pointer: *mut c_void) {
        self.with_window(window, |w| w.user_pointer = user_pointer);
    }

    fn user_pointer(&self, window: RawWindow) -> *mut c_void {
        self.with_window(window, |w| w.user_pointer)
            .unwrap_or(std::ptr::null_mut())
    }

    fn time(&self) -> f64 {
        self.state.borrow().time
    }

    fn poll(&self) {
        self.state.borrow_mut().polls += 1;
        self.dispatch_pending();
    }

    fn wait(&self) {
        self.state.borrow_mut().waits += 1;
        self.dispatch_pending();
    }
}
