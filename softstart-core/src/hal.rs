//! Hardware boundary consumed by the controller.

use crate::boost::ZeroCrossEvent;

/// Analog sense inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseChannel {
    AcVoltage,
    PositiveBank,
    NegativeBank,
    LoadCurrent,
}

/// Supercap bank, each with its own charge switch and discharge PWM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    Positive,
    Negative,
}

pub trait SoftStartHal {
    /// Raw 12-bit count of one sense channel.
    fn read_adc_channel(&mut self, channel: SenseChannel) -> u16;

    /// Discharge duty in timer counts. Implementations clamp to `[0, PWM_PERIOD]`.
    fn set_pwm_duty(&mut self, bank: Bank, counts: u16);

    fn set_charge_enable(&mut self, bank: Bank, on: bool);

    fn set_status_led(&mut self, on: bool);

    /// Monotonic, wrapping millisecond counter.
    fn now_millis(&self) -> u32;

    /// Current zero-cross flag and polarity, without consuming the flag.
    fn zero_cross(&self) -> ZeroCrossEvent;

    /// Clear the zero-cross pending flag.
    fn acknowledge_zero_cross(&mut self);
}
