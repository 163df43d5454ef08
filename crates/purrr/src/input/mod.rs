//! Input vocabulary.
//!
//! Keys, buttons, actions and modifiers, with discriminants and bit layouts
//! equal to the native encodings so they cross the FFI boundary unchanged.

mod types;

pub use types::{Action, Key, KeyModifiers, MouseButton};
