//! `SoftStartHal` on the STM32G031 board.

use embassy_stm32::{
    adc::{Adc, AnyAdcChannel},
    gpio::Output,
    peripherals::{ADC1, TIM3},
    timer::simple_pwm::SimplePwmChannel,
};
use softstart_core::{
    Actuators, Bank, SenseChannel, SharedSignals, SoftStartHal, ZeroCrossEvent,
};

pub type BoardActuators = Actuators<
    Output<'static>,
    Output<'static>,
    Output<'static>,
    SimplePwmChannel<'static, TIM3>,
    SimplePwmChannel<'static, TIM3>,
>;

pub struct Board {
    adc: Adc<'static, ADC1>,
    ac_voltage: AnyAdcChannel<ADC1>,
    bank_pos: AnyAdcChannel<ADC1>,
    bank_neg: AnyAdcChannel<ADC1>,
    load_current: AnyAdcChannel<ADC1>,
    actuators: BoardActuators,
    signals: &'static SharedSignals,
}

impl Board {
    pub fn new(
        adc: Adc<'static, ADC1>,
        ac_voltage: AnyAdcChannel<ADC1>,
        bank_pos: AnyAdcChannel<ADC1>,
        bank_neg: AnyAdcChannel<ADC1>,
        load_current: AnyAdcChannel<ADC1>,
        actuators: BoardActuators,
        signals: &'static SharedSignals,
    ) -> Self {
        Self {
            adc,
            ac_voltage,
            bank_pos,
            bank_neg,
            load_current,
            actuators,
            signals,
        }
    }
}

impl SoftStartHal for Board {
    fn read_adc_channel(&mut self, channel: SenseChannel) -> u16 {
        let pin = match channel {
            SenseChannel::AcVoltage => &mut self.ac_voltage,
            SenseChannel::PositiveBank => &mut self.bank_pos,
            SenseChannel::NegativeBank => &mut self.bank_neg,
            SenseChannel::LoadCurrent => &mut self.load_current,
        };
        self.adc.blocking_read(pin)
    }

    fn set_pwm_duty(&mut self, bank: Bank, counts: u16) {
        self.actuators.set_pwm_duty(bank, counts);
    }

    fn set_charge_enable(&mut self, bank: Bank, on: bool) {
        self.actuators.set_charge_enable(bank, on);
    }

    fn set_status_led(&mut self, on: bool) {
        self.actuators.set_status_led(on);
    }

    fn now_millis(&self) -> u32 {
        self.signals.now_millis()
    }

    fn zero_cross(&self) -> ZeroCrossEvent {
        self.signals.zero_cross()
    }

    fn acknowledge_zero_cross(&mut self) {
        self.signals.acknowledge_zero_cross();
    }
}
