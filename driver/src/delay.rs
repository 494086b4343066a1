//! Blocking delay primitive.
//!
//! Every wait is built from a single-unit wait repeated `n` times, so a backend only has to provide
//! one millisecond and one microsecond.

use std::fmt::Debug;
use std::hint::spin_loop;
use std::thread::sleep;
use std::time::{Duration, Instant};

pub trait Delay: Debug {
    /// Blocks for at least one millisecond.
    fn wait_one_ms(&mut self);

    /// Blocks for at least one microsecond.
    fn wait_one_us(&mut self);

    /// Blocks for at least `ms` milliseconds. `0` returns immediately.
    fn wait_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.wait_one_ms();
        }
    }

    /// Blocks for at least `us` microseconds. `0` returns immediately.
    fn wait_us(&mut self, us: u32) {
        for _ in 0..us {
            self.wait_one_us();
        }
    }
}

/// Delay backed by the host OS.
///
/// Milliseconds sleep the thread, microseconds spin, as the scheduler can't resolve a single
/// microsecond.
#[derive(Debug, Default, Copy, Clone)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn wait_one_ms(&mut self) {
        sleep(Duration::from_millis(1));
    }

    fn wait_one_us(&mut self) {
        let start = Instant::now();
        while start.elapsed() < Duration::from_micros(1) {
            spin_loop();
        }
    }
}
