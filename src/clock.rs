use alloc::vec::Vec;

use crate::SlotId;

/// Who asked for the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameClient {
    Carousel,
    Scroller(SlotId),
}

/// Identifies one registration. Tokens are never reused by the clock that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    pub token: FrameToken,
    pub client: FrameClient,
}

/// The per-display-frame callback source.
///
/// Registrations are one-shot: [`FrameClock::take_due`] hands every pending request to the
/// dispatcher and empties the clock, so a component that wants the following frame must post
/// again while handling this one. Requests posted during dispatch wait for the next frame.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    next: u64,
    pending: Vec<FrameRequest>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, client: FrameClient) -> FrameToken {
        let token = FrameToken(self.next);
        self.next = self.next.wrapping_add(1);
        self.pending.push(FrameRequest { token, client });
        ttrace!(token = token.0, ?client, "FrameClock::post");
        token
    }

    /// Returns `true` if `token` was still pending.
    pub fn remove(&mut self, token: FrameToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.token != token);
        before != self.pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.iter().any(|r| r.token == token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_for(&self, client: FrameClient) -> usize {
        self.pending.iter().filter(|r| r.client == client).count()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Takes every request registered before this frame, in registration order.
    pub fn take_due(&mut self) -> Vec<FrameRequest> {
        core::mem::take(&mut self.pending)
    }
}

/// A component's single active frame registration.
///
/// Every (re)registration cancels the previous one first, so a component can never have two
/// callbacks stacked on the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSubscription {
    active: Option<FrameToken>,
}

impl FrameSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repost(&mut self, clock: &mut FrameClock, client: FrameClient) -> FrameToken {
        self.cancel(clock);
        let token = clock.post(client);
        self.active = Some(token);
        token
    }

    /// Idempotent.
    pub fn cancel(&mut self, clock: &mut FrameClock) {
        if let Some(token) = self.active.take() {
            clock.remove(token);
        }
    }

    /// Consumes the registration when `token` is the current one.
    ///
    /// Returns `false` for stale tokens: the callback was cancelled or superseded after the
    /// frame's requests were taken, and must not run.
    pub fn fire(&mut self, token: FrameToken) -> bool {
        if self.active == Some(token) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn token(&self) -> Option<FrameToken> {
        self.active
    }
}
