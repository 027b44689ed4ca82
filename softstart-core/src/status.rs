//! Status LED patterns.

use crate::state::FaultCode;

/// Number of blink slots in one fault pattern period. The LED is lit in
/// the first slot only, so higher codes blink more slowly.
pub const fn blink_slots(code: FaultCode) -> u32 {
    match code {
        FaultCode::None => 1,
        FaultCode::Overvoltage => 2,
        FaultCode::Undervoltage => 3,
        FaultCode::Overcurrent => 4,
        FaultCode::SupercapOvervoltage => 5,
        FaultCode::Timeout => 6,
    }
}

pub const fn fault_blink_period_ms(code: FaultCode, slot_ms: u32) -> u32 {
    slot_ms.saturating_mul(blink_slots(code))
}

/// Lit during the first slot of every pattern period. A zero slot length
/// gives a solid LED.
pub fn fault_led(code: FaultCode, now_ms: u32, slot_ms: u32) -> bool {
    match now_ms.checked_rem(fault_blink_period_ms(code, slot_ms)) {
        Some(phase) => phase < slot_ms,
        None => true,
    }
}

/// Square wave with the given half period, lit in odd half periods. A zero
/// half period gives a solid LED.
pub fn blink_led(now_ms: u32, half_period_ms: u32) -> bool {
    match now_ms.checked_div(half_period_ms) {
        Some(half_periods) => half_periods & 1 == 1,
        None => true,
    }
}
