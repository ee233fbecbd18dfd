use core::fmt;

/// Identity of one of the three physical display slots.
///
/// Identities never change; the [`Rank`] a slot occupies rotates with every cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(u8);

impl SlotId {
    pub const COUNT: usize = 3;

    pub const ALL: [Self; Self::COUNT] = [Self(0), Self(1), Self(2)];

    /// Returns `None` for indexes outside `0..3`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A logical vertical position in the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The active line. This is the only rank that may scroll horizontally.
    Top,
    Center,
    /// Sits just below the clip edge and slides in on the next cycle.
    Bottom,
}

impl Rank {
    pub const ALL: [Self; 3] = [Self::Top, Self::Center, Self::Bottom];

    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Center => 1,
            Self::Bottom => 2,
        }
    }

    const fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => Self::Top,
            1 => Self::Center,
            _ => Self::Bottom,
        }
    }

    /// The physical slot occupying this rank under `loop_type`.
    ///
    /// `loop_type` names the slot in the top rank; the other ranks follow in slot order.
    pub const fn slot(self, loop_type: u8) -> SlotId {
        SlotId(((self.index() + loop_type as usize) % 3) as u8)
    }

    /// The rank `slot` occupies under `loop_type`. Inverse of [`Rank::slot`].
    pub const fn of(slot: SlotId, loop_type: u8) -> Self {
        Self::from_index(slot.index() + 3 - (loop_type as usize % 3))
    }

    /// Canonical resting offset of this rank, in pixels from the top of the stack.
    pub const fn offset(self, spacing: u32) -> i64 {
        self.index() as i64 * spacing as i64
    }
}

/// Lifecycle of a [`crate::VerticalCarousel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Fewer than three items have been supplied.
    #[default]
    Idle,
    /// A vertical transition is in flight.
    Cycling,
    /// The vertical transition finished and the top line owns the clock with a horizontal scroll.
    Waiting,
    /// Torn down. No further frames are scheduled.
    Stopped,
}

/// Layout measurements provided by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub viewport_width: u32,
    pub line_height: u32,
    pub line_spacing: u32,
}

impl Metrics {
    pub const DEFAULT_LINE_SPACING: u32 = 20;

    pub fn new(viewport_width: u32, line_height: u32) -> Self {
        Self {
            viewport_width,
            line_height,
            line_spacing: Self::DEFAULT_LINE_SPACING,
        }
    }

    pub fn with_line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Distance between two neighbouring ranks.
    pub fn rank_spacing(&self) -> u32 {
        self.line_height.saturating_add(self.line_spacing)
    }

    /// Height a host should reserve: two fully visible lines.
    pub fn container_height(&self) -> u32 {
        self.rank_spacing().saturating_mul(2)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Produced when a vertical cycle completes and consumed by the carousel's transition step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleResult {
    /// Rotation index after the cycle.
    pub loop_type: u8,
    /// The slot now in the top rank.
    pub promoted: SlotId,
    /// The slot that moved to the bottom rank and received the next queued item.
    pub entering: SlotId,
    /// Whether the promoted slot overflows the viewport.
    pub needs_scroll: bool,
}

/// A render-ready snapshot of one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotView<'a> {
    pub slot: SlotId,
    pub rank: Rank,
    pub text: &'a str,
    pub x: i64,
    pub y: i64,
}
