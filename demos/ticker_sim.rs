use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marquee_ticker::{Metrics, SlotId, Surface, TickerOptions, VerticalCarousel};

/// A character-cell surface: one pixel per column, one pixel per row.
#[derive(Default)]
struct Cells {
    dirty: bool,
    lines: Vec<(i64, String)>,
}

const WIDTH: u32 = 24;

impl Surface for Cells {
    fn measure_text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn draw_text(&mut self, text: &str, x: i64, y: i64) {
        let visible: String = text
            .chars()
            .skip(x.unsigned_abs() as usize)
            .take(WIDTH as usize)
            .collect();
        self.lines.push((y, visible));
    }
}

fn main() {
    let scrolls = Arc::new(AtomicUsize::new(0));
    let options = TickerOptions::new()
        .with_cycle_delay_ms(400)
        .with_cycle_duration_ms(300)
        .with_scroll_duration_ms(1200)
        .with_on_cycle_advance(Some(|r: &marquee_ticker::CycleResult| {
            println!(
                "-- cycle: loop_type={} promoted={} needs_scroll={}",
                r.loop_type, r.promoted, r.needs_scroll
            );
        }))
        .with_on_scroll_start(Some({
            let scrolls = Arc::clone(&scrolls);
            move |slot: SlotId| {
                scrolls.fetch_add(1, Ordering::Relaxed);
                println!("-- scroll start on {slot}");
            }
        }));

    let metrics = Metrics::new(WIDTH, 1).with_line_spacing(1);
    let mut ticker = VerticalCarousel::new(Cells::default(), metrics, options);
    ticker.enqueue("Build #4182 passed");
    ticker.enqueue("Deploy to staging finished in 3m12s, all health checks green");
    ticker.enqueue("2 new comments");
    ticker.enqueue("Disk usage at 81%");

    // Simulate a 60 Hz display for ten seconds, printing at most four frames per second.
    let mut now_ms = 0u64;
    let mut next_print = 0u64;
    while now_ms <= 10_000 {
        ticker.tick(now_ms);
        if ticker.surface().dirty && now_ms >= next_print {
            next_print = now_ms + 250;
            ticker.surface_mut().lines.clear();
            ticker.render();
            let phase = ticker.phase();
            let surface = ticker.surface_mut();
            surface.dirty = false;
            surface.lines.sort_by_key(|(y, _)| *y);
            let frame: Vec<String> = surface
                .lines
                .iter()
                .filter(|(y, _)| (0..i64::from(metrics.container_height())).contains(y))
                .map(|(y, text)| format!("{y:>2} |{text:<w$}|", w = WIDTH as usize))
                .collect();
            println!("t={now_ms:>5}ms {phase:?} {}", frame.join("  "));
        }
        now_ms += 1000 / 60;
    }

    ticker.stop();
    println!(
        "stopped: pending_frames={} scrolls={}",
        ticker.pending_frames(),
        scrolls.load(Ordering::Relaxed)
    );
}
