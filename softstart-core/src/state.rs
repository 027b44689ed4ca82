//! Operating states and fault codes.

use portable_atomic_enum::atomic_enum;

use crate::boost::BoostProgress;

/// Reason the controller latched into `Fault`.
///
/// Held for the rest of the power cycle; nothing in the controller clears it.
#[atomic_enum]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCode {
    None,
    Overvoltage,
    Undervoltage,
    Overcurrent,
    SupercapOvervoltage,
    Timeout,
}

/// Discriminant of [`OperatingState`], for logging and publishing.
#[atomic_enum]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateKind {
    Init,
    Idle,
    Charging,
    Ready,
    Boosting,
    Cooldown,
    Fault,
}

/// Controller state, each variant carrying only what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingState {
    /// Power-up state, left on the first tick.
    Init,
    /// Outputs off. No transition enters it.
    Idle,
    Charging { since_ms: u32 },
    Ready { since_ms: u32 },
    Boosting(BoostProgress),
    Cooldown { since_ms: u32 },
    /// Terminal until external reset.
    Fault(FaultCode),
}

impl OperatingState {
    pub fn kind(&self) -> StateKind {
        match self {
            OperatingState::Init => StateKind::Init,
            OperatingState::Idle => StateKind::Idle,
            OperatingState::Charging { .. } => StateKind::Charging,
            OperatingState::Ready { .. } => StateKind::Ready,
            OperatingState::Boosting(_) => StateKind::Boosting,
            OperatingState::Cooldown { .. } => StateKind::Cooldown,
            OperatingState::Fault(_) => StateKind::Fault,
        }
    }

    /// Latched fault code, `FaultCode::None` outside `Fault`.
    pub fn fault(&self) -> FaultCode {
        match self {
            OperatingState::Fault(code) => *code,
            _ => FaultCode::None,
        }
    }

    /// Whether the safety monitor runs in this state.
    pub fn is_monitored(&self) -> bool {
        !matches!(self, OperatingState::Init | OperatingState::Fault(_))
    }
}
