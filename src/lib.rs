//! A headless three-line notification ticker.
//!
//! Short text items rotate through a stack of three lines. Every cycle slides the stack up by one
//! line; when the line that reaches the top is wider than the viewport it first scrolls
//! horizontally to reveal its tail, and the next vertical cycle waits for that scroll to finish.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - text measurement and redraw requests (see [`Surface`])
//! - layout measurements: viewport width, line height, line spacing (see [`Metrics`])
//! - a frame signal: call [`VerticalCarousel::tick`] once per display frame
//!
//! All work happens synchronously inside `tick`. Each animation books at most one callback on the
//! [`FrameClock`] at a time, and `stop` guarantees nothing fires afterwards.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod carousel;
mod clock;
mod error;
mod options;
mod scroller;
mod slot;
mod surface;
mod tween;
mod types;


pub use carousel::VerticalCarousel;
pub use clock::{FrameClient, FrameClock, FrameRequest, FrameSubscription, FrameToken};
pub use error::TickerError;
pub use options::{OnCycleAdvanceCallback, OnScrollCallback, TickerOptions, Timing};
pub use scroller::{HorizontalScroller, ScrollStep};
pub use slot::Slot;
pub use surface::Surface;
pub use tween::AnimationHandle;
pub use types::{CycleResult, Metrics, Phase, Rank, SlotId, SlotView};
