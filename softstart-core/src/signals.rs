//! Word-sized signals shared between interrupt handlers and the control loop.
//!
//! The millisecond counter is written only by the timer interrupt and the
//! zero-cross flag is set only by the edge interrupt, so plain atomic loads
//! and stores are enough. Two edges arriving before the loop looks advance the
//! polarity twice; the loop only ever sees the polarity current at read time.

use core::sync::atomic::Ordering;
use portable_atomic::{AtomicBool, AtomicU32};

use crate::boost::{Polarity, ZeroCrossEvent};

pub struct SharedSignals {
    millis: AtomicU32,
    zc_pending: AtomicBool,
    zc_polarity: AtomicBool,
}

impl SharedSignals {
    pub const fn new() -> Self {
        Self {
            millis: AtomicU32::new(0),
            zc_pending: AtomicBool::new(false),
            zc_polarity: AtomicBool::new(false),
        }
    }

    /// Timer interrupt context, once per millisecond.
    pub fn tick(&self) {
        self.millis.fetch_add(1, Ordering::Relaxed);
    }

    /// Edge interrupt context, on every rising zero-cross edge.
    pub fn on_zero_cross_edge(&self) {
        self.zc_polarity.fetch_xor(true, Ordering::Relaxed);
        self.zc_pending.store(true, Ordering::Release);
    }

    /// Monotonic milliseconds, wrapping after ~49.7 days.
    pub fn now_millis(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }

    pub fn zero_cross(&self) -> ZeroCrossEvent {
        let pending = self.zc_pending.load(Ordering::Acquire);
        let polarity = Polarity::from_bit(self.zc_polarity.load(Ordering::Relaxed));
        ZeroCrossEvent { pending, polarity }
    }

    pub fn acknowledge_zero_cross(&self) {
        self.zc_pending.store(false, Ordering::Relaxed);
    }

    /// Busy-wait on the millisecond counter. Initialization only; the
    /// counter must be advanced by an interrupt while this spins.
    pub fn delay_ms(&self, ms: u32) {
        let start = self.now_millis();
        while self.now_millis().wrapping_sub(start) < ms {
            core::hint::spin_loop();
        }
    }
}

impl Default for SharedSignals {
    fn default() -> Self {
        Self::new()
    }
}
