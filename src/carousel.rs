use alloc::collections::VecDeque;
use alloc::sync::Arc;

use crate::clock::{FrameClient, FrameClock, FrameSubscription};
use crate::{
    AnimationHandle, CycleResult, HorizontalScroller, Metrics, Phase, Rank, ScrollStep, Slot,
    SlotId, SlotView, Surface, TickerError, TickerOptions,
};

/// The three vertical handles of one cycle, indexed by [`Rank`].
///
/// They share delay and duration and latch together, so they reach their targets on the same
/// frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CycleAnimation {
    ranks: [AnimationHandle; 3],
}

impl CycleAnimation {
    fn new(spacing: i64, delay_ms: u64, duration_ms: u64, now_ms: Option<u64>) -> Self {
        let make = |from: i64, to: i64| {
            let handle = AnimationHandle::new(from, to, duration_ms).with_delay(delay_ms);
            match now_ms {
                Some(now_ms) => handle.started_at(now_ms),
                None => handle,
            }
        };
        Self {
            ranks: [make(0, -spacing), make(spacing, 0), make(spacing * 2, spacing)],
        }
    }

    fn latch(&mut self, now_ms: u64) {
        for handle in &mut self.ranks {
            handle.latch(now_ms);
        }
    }

    fn has_begun(&self, now_ms: u64) -> bool {
        self.ranks.iter().all(|h| h.has_begun(now_ms))
    }

    fn is_finished(&self, now_ms: u64) -> bool {
        self.ranks.iter().all(|h| h.is_finished(now_ms))
    }
}

/// A three-line rotating ticker.
///
/// Items are shown in arrival order and loop forever. Every cycle slides the stack up by one
/// rank after a short pause; the line that lands in the top rank scrolls horizontally first when
/// it is wider than the viewport, and the next cycle waits until that scroll is over.
///
/// The carousel holds no UI objects. A host drives it:
/// - `enqueue` for new items,
/// - `set_metrics` when layout changes,
/// - `tick(now_ms)` once per display frame,
/// - `render` (or `slot_views`) when the surface asks for a repaint,
/// - `stop` on teardown.
#[derive(Debug)]
pub struct VerticalCarousel<S> {
    options: TickerOptions,
    metrics: Metrics,
    surface: S,
    clock: FrameClock,
    queue: VecDeque<Arc<str>>,
    slots: [Slot; 3],
    scrollers: [HorizontalScroller; 3],
    loop_type: u8,
    phase: Phase,
    can_marquee: bool,
    marquee_slot: Option<SlotId>,
    cycle: Option<CycleAnimation>,
    frame: FrameSubscription,
}

impl<S: Surface> VerticalCarousel<S> {
    pub fn new(surface: S, metrics: Metrics, options: TickerOptions) -> Self {
        let scrollers = SlotId::ALL.map(|id| {
            let mut scroller = HorizontalScroller::new(id);
            scroller.set_duration_ms(options.timing.scroll_duration_ms);
            scroller.set_listeners(
                options.on_scroll_start.clone(),
                options.on_scroll_end.clone(),
            );
            scroller
        });
        tdebug!(?metrics, timing = ?options.timing, "VerticalCarousel::new");
        let mut carousel = Self {
            options,
            metrics,
            surface,
            clock: FrameClock::new(),
            queue: VecDeque::new(),
            slots: SlotId::ALL.map(Slot::new),
            scrollers,
            loop_type: 0,
            phase: Phase::Idle,
            can_marquee: false,
            marquee_slot: None,
            cycle: None,
            frame: FrameSubscription::new(),
        };
        carousel.reset_offsets();
        carousel
    }

    pub fn options(&self) -> &TickerOptions {
        &self.options
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The physical slot in the top rank. Always in `0..3`.
    pub fn loop_type(&self) -> u8 {
        self.loop_type
    }

    pub fn queue(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.queue.iter().map(|t| &**t)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    pub fn slots(&self) -> &[Slot; 3] {
        &self.slots
    }

    pub fn scroller(&self, id: SlotId) -> &HorizontalScroller {
        &self.scrollers[id.index()]
    }

    pub fn slot_in_rank(&self, rank: Rank) -> &Slot {
        self.slot(rank.slot(self.loop_type))
    }

    pub fn rank_of(&self, id: SlotId) -> Rank {
        Rank::of(id, self.loop_type)
    }

    /// The slot in the top rank, the only one allowed to scroll horizontally.
    pub fn active_slot(&self) -> SlotId {
        Rank::Top.slot(self.loop_type)
    }

    /// True while a vertical transition is in flight.
    pub fn is_cycling(&self) -> bool {
        self.cycle.is_some()
    }

    /// True while the vertical cycle is parked on a horizontal scroll.
    pub fn is_marquee(&self) -> bool {
        self.can_marquee
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pending_frames(&self) -> usize {
        self.clock.pending_count()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Updates layout measurements.
    ///
    /// Resting slots snap to the new rank offsets right away. A transition already in flight
    /// keeps its distances and lands on the new offsets when it completes.
    pub fn set_metrics(&mut self, metrics: Metrics) {
        if self.metrics == metrics {
            return;
        }
        tdebug!(?metrics, "set_metrics");
        self.metrics = metrics;
        if self.cycle.is_none() && self.phase != Phase::Stopped {
            self.reset_offsets();
            self.surface.request_redraw();
        }
    }

    /// Adds an item to the rotation. Empty text is ignored.
    pub fn enqueue(&mut self, text: impl Into<Arc<str>>) {
        let _ = self.try_enqueue(text);
    }

    /// Adds an item to the rotation.
    ///
    /// The first three items fill the top, center and bottom slots in order; the third one
    /// starts the first cycle. Later items wait in the queue for their turn.
    pub fn try_enqueue(&mut self, text: impl Into<Arc<str>>) -> Result<(), TickerError> {
        let text: Arc<str> = text.into();
        if text.is_empty() {
            tdebug!("enqueue: empty text ignored");
            return Err(TickerError::EmptyText);
        }
        self.queue.push_back(Arc::clone(&text));
        let len = self.queue.len();
        ttrace!(len, "enqueue");

        if len <= SlotId::COUNT {
            let slot = Rank::ALL[len - 1].slot(self.loop_type);
            self.slots[slot.index()].set_text(text, &mut self.surface);
            if len == SlotId::COUNT && self.phase == Phase::Idle {
                self.run_cycle(None);
            }
        }
        Ok(())
    }

    /// Advances every animation that asked for this frame.
    ///
    /// Returns the number of frame callbacks that ran. Callbacks booked while this frame is being
    /// processed run on the next call.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        for request in self.clock.take_due() {
            match request.client {
                FrameClient::Carousel => {
                    if self.frame.fire(request.token) {
                        fired += 1;
                        self.cycle_frame(now_ms);
                    }
                }
                FrameClient::Scroller(id) => {
                    let i = id.index();
                    let step = self.scrollers[i].on_frame(
                        request.token,
                        &mut self.slots[i],
                        &mut self.clock,
                        &mut self.surface,
                        now_ms,
                    );
                    match step {
                        ScrollStep::Idle => {}
                        ScrollStep::Running(_) => fired += 1,
                        ScrollStep::Finished => {
                            fired += 1;
                            self.scroll_finished(id, now_ms);
                        }
                    }
                }
            }
        }
        fired
    }

    /// Cuts the current horizontal scroll short and resumes the vertical cycle.
    ///
    /// Fires `on_scroll_end` like a natural finish. Returns `false` when nothing is scrolling.
    pub fn skip_scroll(&mut self, now_ms: u64) -> bool {
        let Some(id) = self.marquee_slot else {
            return false;
        };
        let i = id.index();
        self.scrollers[i].stop(&mut self.slots[i], &mut self.clock, &mut self.surface);
        tdebug!(slot = %id, now_ms, "scroll skipped");
        if let Some(f) = &self.options.on_scroll_end {
            f(id);
        }
        self.scroll_finished(id, now_ms);
        true
    }

    /// Tears everything down. No frame callback fires afterwards.
    ///
    /// Terminal: later items are still queued but the carousel never animates again.
    /// Calling it again is a no-op.
    pub fn stop(&mut self) {
        self.cycle = None;
        self.frame.cancel(&mut self.clock);
        for (scroller, slot) in self.scrollers.iter_mut().zip(self.slots.iter_mut()) {
            scroller.stop(slot, &mut self.clock, &mut self.surface);
        }
        self.can_marquee = false;
        self.marquee_slot = None;

        let mut moved = false;
        for slot in &mut self.slots {
            moved |= slot.vertical_offset != 0;
            slot.vertical_offset = 0;
        }
        if moved {
            self.surface.request_redraw();
        }
        if self.phase != Phase::Stopped {
            tdebug!(queue = self.queue.len(), "stop");
            self.phase = Phase::Stopped;
        }
        debug_assert_eq!(
            self.clock.pending_count(),
            0,
            "stop left frame callbacks behind"
        );
    }

    /// Current placement of every slot that holds text, top rank first.
    pub fn slot_views(&self) -> impl Iterator<Item = SlotView<'_>> + '_ {
        Rank::ALL.into_iter().filter_map(move |rank| {
            let slot = self.slot_in_rank(rank);
            let text = slot.text().filter(|t| !t.is_empty())?;
            Some(SlotView {
                slot: slot.id(),
                rank,
                text,
                x: slot.horizontal_offset,
                y: slot.vertical_offset,
            })
        })
    }

    /// Hands every visible line to the surface.
    pub fn render(&mut self) {
        for slot in &self.slots {
            if let Some(text) = slot.text().filter(|t| !t.is_empty()) {
                self.surface.draw_text(text, slot.horizontal_offset, slot.vertical_offset);
            }
        }
    }

    fn run_cycle(&mut self, now_ms: Option<u64>) {
        if self.phase == Phase::Stopped {
            return;
        }
        if self.can_marquee {
            twarn!("cycle requested while a scroll owns the clock");
            debug_assert!(!self.can_marquee, "cycle requested while a scroll owns the clock");
            return;
        }
        let timing = self.options.timing;
        let spacing = i64::from(self.metrics.rank_spacing());
        self.cycle = Some(CycleAnimation::new(
            spacing,
            timing.cycle_delay_ms,
            timing.cycle_duration_ms,
            now_ms,
        ));
        self.phase = Phase::Cycling;
        self.frame.repost(&mut self.clock, FrameClient::Carousel);
        ttrace!(loop_type = self.loop_type, spacing, ?now_ms, "run_cycle");
    }

    fn cycle_frame(&mut self, now_ms: u64) {
        if self.can_marquee {
            return;
        }
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        cycle.latch(now_ms);
        let cycle = *cycle;

        if cycle.is_finished(now_ms) {
            self.complete_cycle(now_ms);
            return;
        }
        if cycle.has_begun(now_ms) {
            for rank in Rank::ALL {
                let slot = rank.slot(self.loop_type);
                self.slots[slot.index()].vertical_offset =
                    cycle.ranks[rank.index()].sample(now_ms);
            }
            ttrace!(
                top = cycle.ranks[0].sample(now_ms),
                center = cycle.ranks[1].sample(now_ms),
                bottom = cycle.ranks[2].sample(now_ms),
                "cycle frame"
            );
            self.surface.request_redraw();
        }
        self.frame.repost(&mut self.clock, FrameClient::Carousel);
    }

    fn complete_cycle(&mut self, now_ms: u64) {
        self.cycle = None;
        self.frame.cancel(&mut self.clock);

        self.loop_type = (self.loop_type + 1) % 3;
        if let Some(head) = self.queue.pop_front() {
            self.queue.push_back(head);
        }

        let entering = Rank::Bottom.slot(self.loop_type);
        if let Some(next) = self.queue.get(2) {
            let next = Arc::clone(next);
            self.slots[entering.index()].set_text(next, &mut self.surface);
        }
        self.reset_offsets();

        let promoted = Rank::Top.slot(self.loop_type);
        let needs_scroll = self.scrollers[promoted.index()].can_scroll(
            &self.slots[promoted.index()],
            &self.surface,
            self.metrics.viewport_width,
        );
        let result = CycleResult {
            loop_type: self.loop_type,
            promoted,
            entering,
            needs_scroll,
        };
        tdebug!(
            loop_type = result.loop_type,
            promoted = %promoted,
            entering = %entering,
            needs_scroll,
            now_ms,
            "cycle complete"
        );
        if let Some(f) = &self.options.on_cycle_advance {
            f(&result);
        }
        self.transition(result, now_ms);
    }

    fn transition(&mut self, result: CycleResult, now_ms: u64) {
        if !result.needs_scroll {
            self.run_cycle(Some(now_ms));
            return;
        }

        let i = result.promoted.index();
        self.can_marquee = true;
        self.marquee_slot = Some(result.promoted);
        self.phase = Phase::Waiting;
        let started = self.scrollers[i].start(
            &mut self.slots[i],
            &mut self.clock,
            &mut self.surface,
            self.metrics.viewport_width,
            Some(now_ms),
        );
        if started.is_err() {
            self.can_marquee = false;
            self.marquee_slot = None;
            self.run_cycle(Some(now_ms));
        }
    }

    fn scroll_finished(&mut self, id: SlotId, now_ms: u64) {
        if self.marquee_slot != Some(id) {
            return;
        }
        self.marquee_slot = None;
        self.can_marquee = false;
        self.run_cycle(Some(now_ms));
    }

    fn reset_offsets(&mut self) {
        let spacing = self.metrics.rank_spacing();
        for rank in Rank::ALL {
            let slot = rank.slot(self.loop_type);
            self.slots[slot.index()].vertical_offset = rank.offset(spacing);
        }
    }
}
