//! Millisecond time base on the core SysTick timer.
//!
//! Runs as an exception rather than an executor task so the counter keeps
//! advancing while thread mode busy-waits on it.

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use cortex_m_rt::exception;
use defmt::info;

use crate::SIGNALS;

pub fn start(syst: &mut SYST, sysclk_hz: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(sysclk_hz / 1000 - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
    info!("SysTick running at 1 kHz");
}

#[exception]
fn SysTick() {
    SIGNALS.tick();
}
