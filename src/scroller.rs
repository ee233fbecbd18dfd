use crate::clock::{FrameClient, FrameClock, FrameSubscription, FrameToken};
use crate::{AnimationHandle, OnScrollCallback, Slot, SlotId, Surface, TickerError, Timing};

/// Outcome of one scroller frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollStep {
    /// Nothing ran: no scroll is active or the frame callback was stale.
    Idle,
    /// The scroll advanced to this offset and another frame is booked.
    Running(i64),
    /// The scroll reached its end offset. The slot is back at offset 0 and no frame is booked.
    Finished,
}

/// Scrolls one slot's text leftward when it overflows the viewport, then stops.
///
/// The scroll runs from `0` to `viewport_width - text_width` (a negative offset) linearly over
/// the configured duration, sampled once per frame.
#[derive(Clone)]
pub struct HorizontalScroller {
    slot: SlotId,
    duration_ms: u64,
    handle: Option<AnimationHandle>,
    end_offset: i64,
    frame: FrameSubscription,
    on_scroll_start: Option<OnScrollCallback>,
    on_scroll_end: Option<OnScrollCallback>,
}

impl HorizontalScroller {
    pub fn new(slot: SlotId) -> Self {
        Self {
            slot,
            duration_ms: Timing::DEFAULT_SCROLL_DURATION_MS,
            handle: None,
            end_offset: 0,
            frame: FrameSubscription::new(),
            on_scroll_start: None,
            on_scroll_end: None,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Zero falls back to the default duration. Takes effect on the next [`Self::start`].
    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = if duration_ms == 0 {
            Timing::DEFAULT_SCROLL_DURATION_MS
        } else {
            duration_ms
        };
    }

    pub fn set_listeners(
        &mut self,
        on_scroll_start: Option<OnScrollCallback>,
        on_scroll_end: Option<OnScrollCallback>,
    ) {
        self.on_scroll_start = on_scroll_start;
        self.on_scroll_end = on_scroll_end;
    }

    pub fn is_scrolling(&self) -> bool {
        self.handle.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_active()
    }

    /// Offset the active scroll is heading to, or `0` when idle.
    pub fn end_offset(&self) -> i64 {
        match self.handle {
            Some(_) => self.end_offset,
            None => 0,
        }
    }

    pub fn can_scroll<S: Surface + ?Sized>(
        &self,
        slot: &Slot,
        surface: &S,
        viewport_width: u32,
    ) -> bool {
        slot.needs_scroll(surface, viewport_width)
    }

    /// Starts scrolling `slot`.
    ///
    /// A slot that fits the viewport is rejected without side effects. `now_ms` fixes the start
    /// time; with `None` the start latches on the first frame.
    pub fn start<S: Surface + ?Sized>(
        &mut self,
        slot: &mut Slot,
        clock: &mut FrameClock,
        surface: &mut S,
        viewport_width: u32,
        now_ms: Option<u64>,
    ) -> Result<i64, TickerError> {
        debug_assert_eq!(slot.id(), self.slot, "scroller driven with a foreign slot");
        if viewport_width == 0 {
            twarn!(slot = %self.slot, "scroll requested before the viewport is known");
            return Err(TickerError::NoViewport);
        }
        let Some(width) = slot.overflow(&*surface, viewport_width) else {
            twarn!(slot = %self.slot, "scroll requested for a line that fits");
            return Err(TickerError::CannotScroll { slot: self.slot });
        };

        if let Some(f) = &self.on_scroll_start {
            f(self.slot);
        }

        self.end_offset = i64::from(viewport_width) - i64::from(width);
        let mut handle = AnimationHandle::new(0, self.end_offset, self.duration_ms);
        if let Some(now_ms) = now_ms {
            handle = handle.started_at(now_ms);
        }
        self.handle = Some(handle);
        slot.horizontal_offset = 0;
        self.frame.repost(clock, FrameClient::Scroller(self.slot));
        tdebug!(
            slot = %self.slot,
            width,
            viewport_width,
            end_offset = self.end_offset,
            duration_ms = self.duration_ms,
            "scroll start"
        );
        Ok(self.end_offset)
    }

    /// Handles the frame callback identified by `token`.
    pub fn on_frame<S: Surface + ?Sized>(
        &mut self,
        token: FrameToken,
        slot: &mut Slot,
        clock: &mut FrameClock,
        surface: &mut S,
        now_ms: u64,
    ) -> ScrollStep {
        if !self.frame.fire(token) {
            return ScrollStep::Idle;
        }
        let Some(handle) = self.handle.as_mut() else {
            return ScrollStep::Idle;
        };
        handle.latch(now_ms);
        let x = handle.sample(now_ms);
        slot.horizontal_offset = x;
        ttrace!(slot = %self.slot, x, now_ms, "scroll frame");

        if x == self.end_offset {
            self.stop(slot, clock, surface);
            tdebug!(slot = %self.slot, now_ms, "scroll end");
            if let Some(f) = &self.on_scroll_end {
                f(self.slot);
            }
            ScrollStep::Finished
        } else {
            surface.request_redraw();
            self.frame.repost(clock, FrameClient::Scroller(self.slot));
            ScrollStep::Running(x)
        }
    }

    /// Cancels any scroll and puts the text back at offset 0.
    ///
    /// Silent: no end notification fires. Safe to call when nothing is scrolling.
    pub fn stop<S: Surface + ?Sized>(
        &mut self,
        slot: &mut Slot,
        clock: &mut FrameClock,
        surface: &mut S,
    ) {
        let was_active = self.handle.take().is_some() || slot.horizontal_offset != 0;
        self.frame.cancel(clock);
        slot.horizontal_offset = 0;
        if was_active {
            surface.request_redraw();
        }
    }
}

impl core::fmt::Debug for HorizontalScroller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HorizontalScroller")
            .field("slot", &self.slot)
            .field("duration_ms", &self.duration_ms)
            .field("handle", &self.handle)
            .field("end_offset", &self.end_offset)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
