use alloc::sync::Arc;

use crate::{SlotId, Surface};

/// One of the three display surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    id: SlotId,
    text: Option<Arc<str>>,
    pub(crate) vertical_offset: i64,
    pub(crate) horizontal_offset: i64,
}

impl Slot {
    pub(crate) fn new(id: SlotId) -> Self {
        Self {
            id,
            text: None,
            vertical_offset: 0,
            horizontal_offset: 0,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// `None` while the slot has never been assigned an item.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }

    pub fn vertical_offset(&self) -> i64 {
        self.vertical_offset
    }

    pub fn horizontal_offset(&self) -> i64 {
        self.horizontal_offset
    }

    /// True when the text is wider than `viewport_width`.
    ///
    /// An unset viewport or a zero measurement never counts as overflowing.
    pub fn needs_scroll<S: Surface + ?Sized>(&self, surface: &S, viewport_width: u32) -> bool {
        self.overflow(surface, viewport_width).is_some()
    }

    /// Returns the measured text width when it exceeds `viewport_width`.
    pub(crate) fn overflow<S: Surface + ?Sized>(
        &self,
        surface: &S,
        viewport_width: u32,
    ) -> Option<u32> {
        if viewport_width == 0 {
            return None;
        }
        let text = self.text.as_deref().filter(|t| !t.is_empty())?;
        let width = surface.measure_text_width(text);
        (width > viewport_width).then_some(width)
    }

    pub(crate) fn set_text<S: Surface + ?Sized>(&mut self, text: Arc<str>, surface: &mut S) {
        self.text = Some(text);
        surface.request_redraw();
    }
}
