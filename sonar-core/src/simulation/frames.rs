//! Frame sources
//!
//! The engine does not assume any particular clock. Anything that can say
//! "next frame" drives [`Simulation::run`](super::Simulation::run): a
//! renderer's frame callback, a timer, or a fixed count for tests and
//! headless runs.

/// Yields frames until it returns `false`
pub trait FrameSource {
    fn next_frame(&mut self) -> bool;
}

/// A fixed number of frames, delivered immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualFrames {
    remaining: u64,
}

impl ManualFrames {
    pub fn new(count: u64) -> Self {
        ManualFrames { remaining: count }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameSource for ManualFrames {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
