//! Time management utilities

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::debug::DebugDrawQueue;

/// Per-frame timing record consumed by [`PhysicsWorld::step`]
///
/// A zero `delta_time` is a valid "paused" frame: collisions are still
/// detected but only resolved when `single_step` is set.
///
/// [`PhysicsWorld::step`]: crate::physics::PhysicsWorld::step
#[derive(Debug, Clone, Default)]
pub struct FrameParams {
    /// Simulated time elapsed this frame
    pub delta_time: Duration,

    /// Explicit single-step request while paused
    pub single_step: bool,

    /// Optional sink for diagnostic drawing
    pub debug_draw: Option<Arc<DebugDrawQueue>>,
}

impl FrameParams {
    /// Create frame parameters for a frame of the given length
    pub fn new(delta_time: Duration) -> Self {
        Self {
            delta_time,
            ..Default::default()
        }
    }

    /// Create frame parameters for a paused frame
    pub fn paused() -> Self {
        Self::default()
    }

    /// Create frame parameters for a paused frame that still resolves collisions
    pub fn single_step() -> Self {
        Self {
            single_step: true,
            ..Default::default()
        }
    }

    /// Attach a debug draw sink
    pub fn with_debug_draw(mut self, queue: Arc<DebugDrawQueue>) -> Self {
        self.debug_draw = Some(queue);
        self
    }

    /// Frame length in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time.as_secs_f32()
    }

    /// Whether collisions found this frame should be resolved
    pub fn should_resolve(&self) -> bool {
        !self.delta_time.is_zero() || self.single_step
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self
            .start_time
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
