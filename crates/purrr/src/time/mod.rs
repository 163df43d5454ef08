//! Frame timing.
//!
//! `FrameClock` samples the library clock (`events::time`) once per tick and
//! produces clamped per-frame deltas. Keep one clock per window or render
//! loop so multi-window applications do not share delta-time state.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
