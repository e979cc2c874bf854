//! Scripted visitor sessions.
//!
//! A [`SessionScript`] produces the input a visitor would generate: the
//! pointer drifting over the page in a slow figure-eight, with a short burst
//! of scrolling every couple of seconds. Running it against a headless
//! storefront gives a reproducible overlay workload.

use xolo_smoke::{EngineStats, HeadlessHost, Host};
use xolo_ui::InputEvent;

use crate::storefront::Storefront;

/// Timing of a scripted session. All times in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionScript {
    /// Session length.
    pub duration_ms: f64,
    /// Display refresh interval.
    pub frame_ms: f64,
    /// Interval between pointer samples.
    pub pointer_ms: f64,
    /// Interval between the starts of scroll bursts.
    pub scroll_every_ms: f64,
    /// Length of each scroll burst.
    pub scroll_burst_ms: f64,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            duration_ms: 10_000.0,
            frame_ms: 16.0,
            pointer_ms: 8.0,
            scroll_every_ms: 2_000.0,
            scroll_burst_ms: 300.0,
        }
    }
}

/// What a session did to the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionSummary {
    /// Display refreshes the page ran.
    pub refreshes: u64,
    /// Frames the overlay ran.
    pub frames: u64,
    /// Input events delivered.
    pub events: u64,
    /// Highest live particle count seen after a tick.
    pub peak_active: usize,
    /// Largest number of particles drawn in one frame.
    pub peak_drawn: usize,
    /// Sum of particles drawn over all frames.
    pub total_drawn: u64,
    /// Engine counters at the end of the session.
    pub engine: EngineStats,
}

impl SessionSummary {
    /// Mean particles drawn per frame.
    #[must_use]
    pub fn mean_drawn(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_drawn as f64 / self.frames as f64
        }
    }
}

impl SessionScript {
    /// Creates a script of `duration_ms` with default pacing.
    #[must_use]
    pub fn with_duration(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Events with `start <= time < end` for a `width` x `height` page.
    #[must_use]
    pub fn events_between(
        &self,
        start: f64,
        end: f64,
        width: f32,
        height: f32,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for time in ticks_between(start, end, self.pointer_ms) {
            let t = time as f32;
            events.push(InputEvent::PointerMove {
                x: width * (0.5 + 0.35 * (t * 0.0013).sin()),
                y: height * (0.5 + 0.3 * (t * 0.0021).sin()),
                time,
            });
        }

        for time in ticks_between(start, end, self.frame_ms) {
            if self.scroll_every_ms > 0.0 && time % self.scroll_every_ms < self.scroll_burst_ms {
                events.push(InputEvent::Scroll {
                    delta_y: 40.0,
                    time,
                });
            }
        }

        events.sort_by(|a, b| {
            a.time()
                .partial_cmp(&b.time())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        events
    }

    /// Plays the script against a headless storefront.
    pub fn run(&self, page: &mut Storefront<HeadlessHost>) -> SessionSummary {
        let mut summary = SessionSummary::default();
        if !(self.frame_ms > 0.0 && self.duration_ms.is_finite()) {
            return summary;
        }

        let start = page.host().now();
        let mut clock = start;

        while clock - start < self.duration_ms {
            let next = clock + self.frame_ms;
            let viewport = page.host().viewport();
            let events =
                self.events_between(clock - start, next - start, viewport.width, viewport.height);
            for event in events {
                page.handle_input(&shift(event, start));
                summary.events += 1;
            }

            page.host_mut().advance(self.frame_ms);
            clock = next;

            // The page refreshes whether or not the overlay scheduled a frame
            page.advance();
            summary.refreshes += 1;

            // Drain whatever the host scheduled for this refresh
            while let Some(request) = page.host_mut().take_frame() {
                if let Some(report) = page.on_frame(request) {
                    summary.frames += 1;
                    summary.peak_active = summary.peak_active.max(report.active);
                    summary.peak_drawn = summary.peak_drawn.max(report.drawn);
                    summary.total_drawn += report.drawn as u64;
                    // The effect reschedules itself; leave that for the next refresh
                    break;
                }
            }
        }

        if let Some(engine) = page.smoke().engine() {
            summary.engine = engine.stats();
        }
        tracing::info!(
            refreshes = summary.refreshes,
            frames = summary.frames,
            events = summary.events,
            peak_active = summary.peak_active,
            "session finished"
        );
        summary
    }
}

/// Multiples of `step` in `[start, end)`.
fn ticks_between(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    if step <= 0.0 || !step.is_finite() {
        return ticks;
    }

    let mut i = (start / step).ceil().max(0.0) as u64;
    loop {
        let time = i as f64 * step;
        if time >= end {
            break;
        }
        ticks.push(time);
        i += 1;
    }
    ticks
}

fn shift(event: InputEvent, offset: f64) -> InputEvent {
    match event {
        InputEvent::PointerMove { x, y, time } => InputEvent::PointerMove {
            x,
            y,
            time: time + offset,
        },
        InputEvent::Scroll { delta_y, time } => InputEvent::Scroll {
            delta_y,
            time: time + offset,
        },
        resize @ InputEvent::Resize { .. } => resize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_cover_half_open_range() {
        assert_eq!(ticks_between(0.0, 32.0, 16.0), vec![0.0, 16.0]);
        assert_eq!(ticks_between(10.0, 40.0, 8.0), vec![16.0, 24.0, 32.0]);
        assert!(ticks_between(0.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn test_events_are_time_ordered() {
        let script = SessionScript::default();
        let events = script.events_between(0.0, 64.0, 800.0, 600.0);

        let times: Vec<f64> = events.iter().filter_map(InputEvent::time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        // 8 pointer samples and 4 scroll ticks inside the first burst
        assert_eq!(events.len(), 12);
    }

    #[test]
    fn test_no_scroll_between_bursts() {
        let script = SessionScript::default();
        let events = script.events_between(500.0, 1500.0, 800.0, 600.0);
        assert!(events
            .iter()
            .all(|e| matches!(e, InputEvent::PointerMove { .. })));
    }

    #[test]
    fn test_pointer_stays_on_page() {
        let script = SessionScript::default();
        for event in script.events_between(0.0, 5000.0, 800.0, 600.0) {
            if let InputEvent::PointerMove { x, y, .. } = event {
                assert!((0.0..=800.0).contains(&x));
                assert!((0.0..=600.0).contains(&y));
            }
        }
    }
}
