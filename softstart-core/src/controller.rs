//! One control tick against the hardware.

use crate::{
    config::Config,
    hal::{Bank, SenseChannel, SoftStartHal},
    machine::{Inputs, SoftStart, TickReport},
    measurement::{MeasurementSnapshot, RawReadings},
};

pub struct Controller {
    machine: SoftStart,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        Self {
            machine: SoftStart::new(config),
        }
    }

    pub fn machine(&self) -> &SoftStart {
        &self.machine
    }

    /// Read, decide, actuate.
    ///
    /// The snapshot is rebuilt from fresh ADC reads every call and the whole
    /// output image is written back, so a stray write elsewhere is overridden
    /// on the next tick.
    pub fn tick<H: SoftStartHal>(&mut self, hal: &mut H) -> TickReport {
        let now_ms = hal.now_millis();
        let raw = RawReadings {
            ac_voltage: hal.read_adc_channel(SenseChannel::AcVoltage),
            sc_voltage_pos: hal.read_adc_channel(SenseChannel::PositiveBank),
            sc_voltage_neg: hal.read_adc_channel(SenseChannel::NegativeBank),
            load_current: hal.read_adc_channel(SenseChannel::LoadCurrent),
        };
        let inputs = Inputs {
            now_ms,
            snapshot: MeasurementSnapshot::from_raw(&raw),
            zero_cross: hal.zero_cross(),
        };
        trace!("tick {}", inputs);

        let report = self.machine.step(&inputs);
        if report.consumed_zero_cross {
            hal.acknowledge_zero_cross();
        }

        let outputs = report.outputs;
        hal.set_pwm_duty(Bank::Positive, outputs.pwm_pos);
        hal.set_pwm_duty(Bank::Negative, outputs.pwm_neg);
        hal.set_charge_enable(Bank::Positive, outputs.charge_pos);
        hal.set_charge_enable(Bank::Negative, outputs.charge_neg);
        hal.set_status_led(outputs.led);
        report
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Config::DEFAULT)
    }
}
