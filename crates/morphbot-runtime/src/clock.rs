//! Frame pacing

use std::time::{Duration, Instant};

/// Paces the render loop with a fixed wait between frames
pub struct FrameClock {
    /// Wait between the end of one frame and the start of the next
    pub frame_delay: Duration,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

impl FrameClock {
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance the clock. Call once per rendered frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.first_tick = false;
        self.last_instant = now;
    }

    /// When the next frame should start
    pub fn next_frame_at(&self) -> Instant {
        self.last_instant + self.frame_delay
    }

    /// Whether the inter-frame delay has elapsed
    pub fn is_frame_due(&self, now: Instant) -> bool {
        self.first_tick || now >= self.next_frame_at()
    }
}

/// Counts frames and fires once every `every` frames
#[derive(Clone, Debug)]
pub struct StepGate {
    every: u32,
    count: u32,
}

impl StepGate {
    /// A period of zero is treated as one
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    pub fn every(&self) -> u32 {
        self.every
    }

    /// Count one frame. Returns true on every `every`-th call.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count % self.every == 0 {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Restart the count so the next fire is a full period away
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
