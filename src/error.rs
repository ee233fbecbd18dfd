use thiserror::Error;

use crate::SlotId;

/// Rejected operations. None of these leave partial state behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TickerError {
    /// Empty text was offered to the queue.
    #[error("ticker text must not be empty")]
    EmptyText,

    /// A scroll was requested for a slot whose text fits the viewport.
    #[error("{slot} does not overflow the viewport")]
    CannotScroll { slot: SlotId },

    /// The host has not reported a viewport width yet.
    #[error("viewport width is not established")]
    NoViewport,
}
