//! Zero-cross detector on PA0, serviced in the EXTI0_1 interrupt.
//!
//! Every rising edge toggles the polarity bit, so the edge is latched in the
//! handler itself. An executor task only re-arms on its next poll and would
//! lose an edge that arrives before then.

use defmt::info;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::InterruptExt;
use embassy_stm32::{gpio::Input, pac};

use crate::SIGNALS;

/// PA0 on EXTI line 0.
const LINE: usize = 0;
const PORT_A: u8 = 0;

/// Keeps the input pin configured while the interrupt is armed.
pub struct Detector {
    _pin: Input<'static>,
}

impl Detector {
    pub fn new(pin: Input<'static>) -> Self {
        pac::EXTI.exticr(LINE / 4).modify(|w| w.set_exti(LINE % 4, PORT_A));
        pac::EXTI.ftsr(0).modify(|w| w.set_line(LINE, false));
        pac::EXTI.rtsr(0).modify(|w| w.set_line(LINE, true));
        pac::EXTI.rpr(0).write(|w| w.set_line(LINE, true));
        pac::EXTI.imr(0).modify(|w| w.set_line(LINE, true));

        interrupt::EXTI0_1.unpend();
        unsafe { interrupt::EXTI0_1.enable() };
        info!("Zero-cross detector armed.");
        Self { _pin: pin }
    }
}

#[interrupt]
unsafe fn EXTI0_1() {
    pac::EXTI.rpr(0).write(|w| w.set_line(LINE, true));
    SIGNALS.on_zero_cross_edge();
}
