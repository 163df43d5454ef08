//! Owned windows.
//!
//! A `Window` wraps one native window handle: queries and mutators forward
//! to the driver, callbacks are registered per window, and the handle is
//! destroyed exactly once.

mod callbacks;
mod config;
mod image;
mod wrapper;

pub use callbacks::{
    CursorEnterCallback, CursorLeaveCallback, CursorMoveCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback, WindowCallbacks,
};
pub use config::WindowCreateInfo;
pub use image::Image;
pub use wrapper::Window;
