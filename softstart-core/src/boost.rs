//! Phase-synchronised discharge ramp used while boosting.

use crate::config::Ramp;

/// AC half-cycle reported by the zero-cross detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Map the detector's polarity bit, `true` meaning the positive half-cycle.
    pub fn from_bit(positive: bool) -> Self {
        if positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

/// Zero-cross state as seen by the control loop on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZeroCrossEvent {
    /// An edge arrived since the flag was last acknowledged.
    pub pending: bool,
    /// Current half-cycle, valid at the time of the read.
    pub polarity: Polarity,
}

impl ZeroCrossEvent {
    pub const NONE: Self = Self {
        pending: false,
        polarity: Polarity::Negative,
    };
}

/// Ramp position within one boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoostProgress {
    pub duty_counts: u16,
    pub state_entry_ms: u32,
}

impl BoostProgress {
    pub fn start(ramp: &Ramp, now_ms: u32) -> Self {
        Self {
            duty_counts: ramp.start,
            state_entry_ms: now_ms,
        }
    }

    /// Advance one step for a consumed zero crossing, saturating at the ceiling.
    pub fn on_zero_cross(&mut self, ramp: &Ramp) {
        if self.duty_counts < ramp.ceiling {
            self.duty_counts = self.duty_counts.saturating_add(ramp.step).min(ramp.ceiling);
            debug!("boost duty {=u16}", self.duty_counts);
        }
    }

    /// Duty for the (positive, negative) bank channels. Only the bank
    /// matching the current half-cycle discharges.
    pub fn duty_for(&self, polarity: Polarity) -> (u16, u16) {
        match polarity {
            Polarity::Positive => (self.duty_counts, 0),
            Polarity::Negative => (0, self.duty_counts),
        }
    }

    pub fn dwell_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.state_entry_ms)
    }
}
