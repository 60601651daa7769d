//! Autoscroll timer.
//!
//! While the pointer is held near a viewport edge during a drag, a tokio
//! interval task emits synthetic pointer samples that walk the pointer
//! toward that edge. The controller feeds them back through
//! `update_action`. The task is aborted when the [`AutoScroll`] is
//! dropped, which happens on commit, cancel and abort.

use hvacdraw_core::{Point, Rect};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::debug;

/// Pending ticks are dropped rather than queued past this depth.
const TICK_BUFFER: usize = 8;

/// Unit direction of scrolling on each axis (-1, 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDirection {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollDirection {
    pub fn is_none(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Which edges of `viewport` the pointer is within `margin` of.
pub fn edge_direction(pointer: Point, viewport: &Rect, margin: f64) -> Option<ScrollDirection> {
    let mut dir = ScrollDirection::default();
    if pointer.x < viewport.x + margin {
        dir.dx = -1.0;
    } else if pointer.x > viewport.right() - margin {
        dir.dx = 1.0;
    }
    if pointer.y < viewport.y + margin {
        dir.dy = -1.0;
    } else if pointer.y > viewport.bottom() - margin {
        dir.dy = 1.0;
    }
    (!dir.is_none()).then_some(dir)
}

/// A synthetic pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollTick {
    /// 1-based tick counter.
    pub tick: u64,
    /// Pointer position after `tick` scroll steps.
    pub pointer: Point,
    pub direction: ScrollDirection,
}

/// Running autoscroll task.
#[derive(Debug)]
pub struct AutoScroll {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<AutoScrollTick>,
}

impl AutoScroll {
    /// Spawn the interval task on the current tokio runtime.
    ///
    /// Returns `None` when no runtime is available.
    pub fn start(
        interval: Duration,
        pointer: Point,
        direction: ScrollDirection,
        step: f64,
    ) -> Option<Self> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let (tx, rx) = mpsc::channel(TICK_BUFFER);

        let handle = runtime.spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of an interval completes immediately.
            timer.tick().await;

            let mut tick = 0u64;
            loop {
                timer.tick().await;
                tick += 1;
                let n = tick as f64 * step;
                let sample = AutoScrollTick {
                    tick,
                    pointer: pointer.offset(direction.dx * n, direction.dy * n),
                    direction,
                };
                if tx.send(sample).await.is_err() {
                    break;
                }
            }
        });

        debug!(?direction, ?interval, "Autoscroll started");
        Some(Self { handle, rx })
    }

    /// Wait for the next sample.
    pub async fn next_tick(&mut self) -> Option<AutoScrollTick> {
        self.rx.recv().await
    }

    /// Next sample if one is already waiting.
    pub fn try_next(&mut self) -> Option<AutoScrollTick> {
        self.rx.try_recv().ok()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task now.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for AutoScroll {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Autoscroll stopped");
    }
}
