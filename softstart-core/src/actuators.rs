//! Charge switches, discharge PWM and status LED behind embedded-hal traits.

use core::convert::Infallible;
use embedded_hal::{
    digital::{OutputPin, PinState},
    pwm::SetDutyCycle,
};
use unwrap_infallible::UnwrapInfallible;

use crate::{config::PWM_PERIOD, hal::Bank, machine::OutputImage};

pub struct Actuators<CP, CN, L, PP, PN> {
    charge_pos: CP,
    charge_neg: CN,
    led: L,
    pwm_pos: PP,
    pwm_neg: PN,
}

impl<CP, CN, L, PP, PN> Actuators<CP, CN, L, PP, PN>
where
    CP: OutputPin<Error = Infallible>,
    CN: OutputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
    PP: SetDutyCycle<Error = Infallible>,
    PN: SetDutyCycle<Error = Infallible>,
{
    /// Take ownership of the outputs and drive them all inactive.
    pub fn new(charge_pos: CP, charge_neg: CN, led: L, pwm_pos: PP, pwm_neg: PN) -> Self {
        let mut actuators = Self {
            charge_pos,
            charge_neg,
            led,
            pwm_pos,
            pwm_neg,
        };
        actuators.apply(&OutputImage::SAFE);
        actuators
    }

    /// Set discharge duty in `PWM_PERIOD` counts, scaled to the channel's
    /// own maximum duty.
    pub fn set_pwm_duty(&mut self, bank: Bank, counts: u16) {
        let counts = counts.min(PWM_PERIOD);
        let result = match bank {
            Bank::Positive => self.pwm_pos.set_duty_cycle_fraction(counts, PWM_PERIOD),
            Bank::Negative => self.pwm_neg.set_duty_cycle_fraction(counts, PWM_PERIOD),
        };
        result.unwrap_infallible();
    }

    pub fn set_charge_enable(&mut self, bank: Bank, on: bool) {
        let state = PinState::from(on);
        let result = match bank {
            Bank::Positive => self.charge_pos.set_state(state),
            Bank::Negative => self.charge_neg.set_state(state),
        };
        result.unwrap_infallible();
    }

    pub fn set_status_led(&mut self, on: bool) {
        self.led.set_state(PinState::from(on)).unwrap_infallible();
    }

    pub fn apply(&mut self, image: &OutputImage) {
        self.set_pwm_duty(Bank::Positive, image.pwm_pos);
        self.set_pwm_duty(Bank::Negative, image.pwm_neg);
        self.set_charge_enable(Bank::Positive, image.charge_pos);
        self.set_charge_enable(Bank::Negative, image.charge_neg);
        self.set_status_led(image.led);
    }
}
