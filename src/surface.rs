/// The drawing collaborator.
///
/// The ticker never touches pixels: it asks the surface how wide a string is, tells it when
/// something visible changed, and hands it text plus offsets during
/// [`crate::VerticalCarousel::render`].
pub trait Surface {
    /// Width of `text` in pixels at the configured font size.
    fn measure_text_width(&self, text: &str) -> u32;

    /// Schedules a repaint. Coalescing is up to the implementation.
    fn request_redraw(&mut self);

    /// Draws one line with its left edge at `x` and its top at `y`, relative to the ticker.
    fn draw_text(&mut self, text: &str, x: i64, y: i64) {
        let _ = (text, x, y);
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn measure_text_width(&self, text: &str) -> u32 {
        (**self).measure_text_width(text)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw();
    }

    fn draw_text(&mut self, text: &str, x: i64, y: i64) {
        (**self).draw_text(text, x, y);
    }
}
