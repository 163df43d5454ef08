//! Process-wide event pump and clock.
//!
//! These functions carry no per-call state; they forward to the library,
//! which services every window at once. Callbacks registered on windows run
//! from inside `poll` and `wait`.

mod pump;

pub use pump::{poll, time, wait};
