//! Frame-aligned coalescing of high-frequency input.
//!
//! Scroll and resize events may arrive many times per frame. The latest
//! arguments are kept and handed out once at the next frame boundary.

use tracing::trace;

use super::viewport::{compute_visible_window, Viewport, VisibleWindow, WindowParams};

/// Trailing-edge throttle: latest value wins, at most one release per frame.
#[derive(Debug, Clone)]
pub struct FrameThrottle<T> {
    pending: Option<T>,
    dropped: u64,
}

impl<T> Default for FrameThrottle<T> {
    fn default() -> Self {
        Self {
            pending: None,
            dropped: 0,
        }
    }
}

impl<T> FrameThrottle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Replaces anything not yet released this frame.
    pub fn push(&mut self, value: T) {
        if self.pending.replace(value).is_some() {
            self.dropped += 1;
        }
    }

    /// Called once per frame boundary; yields the latest pushed value, if any.
    pub fn on_frame(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Events superseded before their frame came.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Owns the current [`Viewport`] and recomputes the visible window at most
/// once per frame.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    throttle: FrameThrottle<Viewport>,
    viewport: Viewport,
    window: VisibleWindow,
    params: Option<WindowParams>,
    computations: u64,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll or resize event. Cheap; the work happens in [`Self::on_frame`].
    pub fn observe(&mut self, viewport: Viewport) {
        self.throttle.push(viewport);
    }

    /// Frame boundary. Recomputes when a viewport event arrived or the grid
    /// parameters changed, and returns the window to render with.
    pub fn on_frame(&mut self, params: WindowParams) -> VisibleWindow {
        let moved = match self.throttle.on_frame() {
            Some(viewport) => {
                self.viewport = viewport;
                true
            }
            None => false,
        };
        if moved || self.params != Some(params) {
            self.params = Some(params);
            self.window = compute_visible_window(&self.viewport, &params);
            self.computations += 1;
            trace!(window = ?self.window, "visible window recomputed");
        }
        self.window
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Number of window recomputations so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewport::Overscan;

    fn params() -> WindowParams {
        WindowParams {
            row_height: 36.0,
            pixels_per_day: 30.0,
            total_rows: 1000,
            total_days: 1000,
            overscan: Overscan { rows: 0, days: 0 },
        }
    }

    fn scrolled(top: f32) -> Viewport {
        Viewport {
            scroll_left: 0.0,
            scroll_top: top,
            width: 300.0,
            height: 360.0,
        }
    }

    #[test]
    fn throttle_keeps_latest() {
        let mut t = FrameThrottle::new();
        assert_eq!(t.on_frame(), None::<u32>);
        t.push(1);
        t.push(2);
        t.push(3);
        assert!(t.is_scheduled());
        assert_eq!(t.on_frame(), Some(3));
        assert_eq!(t.on_frame(), None);
        assert_eq!(t.dropped(), 2);
    }

    #[test]
    fn tracker_computes_once_per_frame_with_latest_viewport() {
        let mut tracker = ViewportTracker::new();
        let first = tracker.on_frame(params());
        assert_eq!(tracker.computations(), 1);
        assert_eq!(first.row_start, 0);

        for top in [36.0, 72.0, 360.0, 720.0] {
            tracker.observe(scrolled(top));
        }
        let w = tracker.on_frame(params());
        assert_eq!(tracker.computations(), 2);
        assert_eq!((w.row_start, w.row_end), (20, 30));
        assert_eq!(tracker.viewport().scroll_top, 720.0);

        // Quiet frame: nothing new, nothing recomputed.
        assert_eq!(tracker.on_frame(params()), w);
        assert_eq!(tracker.computations(), 2);
    }

    #[test]
    fn tracker_recomputes_when_grid_changes() {
        let mut tracker = ViewportTracker::new();
        tracker.observe(scrolled(0.0));
        tracker.on_frame(params());

        let mut fewer = params();
        fewer.total_rows = 4;
        let w = tracker.on_frame(fewer);
        assert_eq!(w.row_end, 4);
        assert_eq!(tracker.computations(), 2);
    }
}
