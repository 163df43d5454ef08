//! Safe bindings over the purrr windowing/rendering library.
//!
//! Native handles are wrapped in owning types (`Renderer`, `Window`) that
//! destroy them exactly once, and every native result code is checked and
//! turned into [`Error`] on failure. All calls go through a [`Driver`]:
//! `NativeDriver` (feature `native`) for libpurrr, `MockDriver` for tests.
//! Feature `link` also links against libpurrr; without it the final binary
//! must supply the `purrr_` symbols some other way.
//!
//! ```
//! use purrr::{MockDriver, Renderer, WindowCreateInfo};
//!
//! let driver = MockDriver::new();
//! let renderer = Renderer::new(driver.clone())?;
//! let window = renderer.create_window(&WindowCreateInfo::new("demo", 640, 480))?;
//!
//! while !window.should_close() {
//!     purrr::events::poll(&driver);
//!     # break;
//! }
//! # Ok::<(), purrr::Error>(())
//! ```

pub mod driver;
pub mod error;
pub mod events;
pub mod handle;
pub mod input;
pub mod renderer;
pub mod window;

pub mod logging;
pub mod time;

pub use driver::{Driver, MockDriver, RawImage, RawRenderer, RawWindow};
#[cfg(feature = "native")]
pub use driver::NativeDriver;
pub use error::{Error, Result, ResultCode};
pub use input::{Action, Key, KeyModifiers, MouseButton};
pub use renderer::Renderer;
pub use window::{Image, Window, WindowCreateInfo};
