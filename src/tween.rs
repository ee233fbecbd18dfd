/// One in-flight linear interpolation between two pixel values.
///
/// `value(t) = from + (to - from) * clamp((t - delay) / duration, 0, 1)`, truncated toward zero.
/// Integer math keeps the law exact at both ends: the first sample after the delay is `from`
/// and the final sample is exactly `to`.
///
/// A handle is never retargeted. Each new cycle or scroll replaces it with a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationHandle {
    pub from: i64,
    pub to: i64,
    pub delay_ms: u64,
    pub duration_ms: u64,
    start_ms: Option<u64>,
}

impl AnimationHandle {
    /// Creates a handle whose start time latches on the first call to [`Self::latch`].
    pub fn new(from: i64, to: i64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            delay_ms: 0,
            duration_ms: duration_ms.max(1),
            start_ms: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn started_at(mut self, now_ms: u64) -> Self {
        self.start_ms = Some(now_ms);
        self
    }

    /// Fixes the start time to `now_ms` unless it is already set.
    pub fn latch(&mut self, now_ms: u64) {
        if self.start_ms.is_none() {
            self.start_ms = Some(now_ms);
        }
    }

    pub fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }

    fn elapsed(&self, now_ms: u64) -> Option<u64> {
        let start = self.start_ms?;
        let since = now_ms.saturating_sub(start);
        if since < self.delay_ms {
            return None;
        }
        Some((since - self.delay_ms).min(self.duration_ms))
    }

    /// False while the start is unlatched or `now_ms` is still inside the start delay.
    pub fn has_begun(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms).is_some()
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) == Some(self.duration_ms)
    }

    /// Progress in thousandths, `0..=1000`.
    pub fn fraction_permille(&self, now_ms: u64) -> u32 {
        match self.elapsed(now_ms) {
            Some(elapsed) => (elapsed.saturating_mul(1000) / self.duration_ms) as u32,
            None => 0,
        }
    }

    pub fn sample(&self, now_ms: u64) -> i64 {
        let Some(elapsed) = self.elapsed(now_ms) else {
            return self.from;
        };
        let span = i128::from(self.to) - i128::from(self.from);
        let step = span * i128::from(elapsed) / i128::from(self.duration_ms);
        self.from + step as i64
    }
}
