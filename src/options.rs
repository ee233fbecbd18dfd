use alloc::sync::Arc;

use crate::{CycleResult, SlotId};

/// Fired after every completed vertical cycle, before the next one is scheduled.
pub type OnCycleAdvanceCallback = Arc<dyn Fn(&CycleResult) + Send + Sync>;

/// Fired when a slot starts or finishes its horizontal scroll.
pub type OnScrollCallback = Arc<dyn Fn(SlotId) + Send + Sync>;

/// Animation durations, in milliseconds.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` so hosts can keep it
/// in their own configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Duration of one vertical slide.
    pub cycle_duration_ms: u64,
    /// Pause before each vertical slide starts moving.
    pub cycle_delay_ms: u64,
    /// Duration of one full horizontal overflow scroll. Zero falls back to the default.
    pub scroll_duration_ms: u64,
}

impl Timing {
    pub const DEFAULT_CYCLE_DURATION_MS: u64 = 1500;
    pub const DEFAULT_CYCLE_DELAY_MS: u64 = 1000;
    pub const DEFAULT_SCROLL_DURATION_MS: u64 = 3000;

    pub(crate) fn effective_scroll_duration_ms(&self) -> u64 {
        if self.scroll_duration_ms == 0 {
            Self::DEFAULT_SCROLL_DURATION_MS
        } else {
            self.scroll_duration_ms
        }
    }

    /// Time from the start of one vertical cycle to the start of the next when nothing scrolls.
    pub fn cycle_period_ms(&self) -> u64 {
        self.cycle_delay_ms.saturating_add(self.cycle_duration_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            cycle_duration_ms: Self::DEFAULT_CYCLE_DURATION_MS,
            cycle_delay_ms: Self::DEFAULT_CYCLE_DELAY_MS,
            scroll_duration_ms: Self::DEFAULT_SCROLL_DURATION_MS,
        }
    }
}

/// Configuration for [`crate::VerticalCarousel`].
///
/// Hooks are stored in `Arc`s so the options stay cheap to clone.
#[derive(Clone, Default)]
pub struct TickerOptions {
    pub timing: Timing,
    pub on_cycle_advance: Option<OnCycleAdvanceCallback>,
    pub on_scroll_start: Option<OnScrollCallback>,
    pub on_scroll_end: Option<OnScrollCallback>,
}

impl TickerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_cycle_duration_ms(mut self, duration_ms: u64) -> Self {
        self.timing.cycle_duration_ms = duration_ms;
        self
    }

    pub fn with_cycle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.timing.cycle_delay_ms = delay_ms;
        self
    }

    pub fn with_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.timing.scroll_duration_ms = duration_ms;
        self
    }

    pub fn with_on_cycle_advance(
        mut self,
        f: Option<impl Fn(&CycleResult) + Send + Sync + 'static>,
    ) -> Self {
        self.on_cycle_advance = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_start(
        mut self,
        f: Option<impl Fn(SlotId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_start = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_end(
        mut self,
        f: Option<impl Fn(SlotId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_end = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for TickerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickerOptions")
            .field("timing", &self.timing)
            .field("on_cycle_advance", &self.on_cycle_advance.is_some())
            .field("on_scroll_start", &self.on_scroll_start.is_some())
            .field("on_scroll_end", &self.on_scroll_end.is_some())
            .finish()
    }
}
