//! Soft-start state machine.
//!
//! [`SoftStart::step`] is a pure transition over one control tick: it takes
//! the tick's inputs, advances the state and returns the complete output
//! image to be written to the hardware.

use crate::{
    boost::{BoostProgress, ZeroCrossEvent},
    config::Config,
    hal::Bank,
    measurement::MeasurementSnapshot,
    safety,
    state::{FaultCode, OperatingState, StateKind},
    status,
};

/// Everything one tick decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    pub now_ms: u32,
    pub snapshot: MeasurementSnapshot,
    pub zero_cross: ZeroCrossEvent,
}

/// Commanded level of every actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputImage {
    pub pwm_pos: u16,
    pub pwm_neg: u16,
    pub charge_pos: bool,
    pub charge_neg: bool,
    pub led: bool,
}

impl OutputImage {
    /// Everything off.
    pub const SAFE: Self = Self {
        pwm_pos: 0,
        pwm_neg: 0,
        charge_pos: false,
        charge_neg: false,
        led: false,
    };

    pub fn pwm(&self, bank: Bank) -> u16 {
        match bank {
            Bank::Positive => self.pwm_pos,
            Bank::Negative => self.pwm_neg,
        }
    }

    pub fn charge(&self, bank: Bank) -> bool {
        match bank {
            Bank::Positive => self.charge_pos,
            Bank::Negative => self.charge_neg,
        }
    }

    /// Charging and discharging are never commanded together.
    pub fn is_interlocked(&self) -> bool {
        let discharging = self.pwm_pos != 0 || self.pwm_neg != 0;
        let charging = self.charge_pos || self.charge_neg;
        !(discharging && charging)
    }

    /// Power stage fully off; the LED is left alone.
    pub fn is_fail_safe(&self) -> bool {
        self.pwm_pos == 0 && self.pwm_neg == 0 && !self.charge_pos && !self.charge_neg
    }

    fn disable_pwm(&mut self) {
        self.pwm_pos = 0;
        self.pwm_neg = 0;
    }

    fn set_charging(&mut self, on: bool) {
        self.charge_pos = on;
        self.charge_neg = on;
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub state: StateKind,
    pub fault: FaultCode,
    pub outputs: OutputImage,
    /// The pending zero-cross flag was used and must be acknowledged.
    pub consumed_zero_cross: bool,
}

pub struct SoftStart {
    config: Config,
    state: OperatingState,
    outputs: OutputImage,
}

impl SoftStart {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: OperatingState::Init,
            outputs: OutputImage::SAFE,
        }
    }

    pub fn state(&self) -> OperatingState {
        self.state
    }

    pub fn fault(&self) -> FaultCode {
        self.state.fault()
    }

    pub fn outputs(&self) -> OutputImage {
        self.outputs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn step(&mut self, inputs: &Inputs) -> TickReport {
        let now = inputs.now_ms;
        let snapshot = &inputs.snapshot;
        let thresholds = self.config.thresholds;
        let timing = self.config.timing;
        let mut consumed_zero_cross = false;

        if self.state.is_monitored() {
            if let Err(code) = safety::check_envelope(snapshot, &self.config.limits) {
                self.enter_fault(code, now, snapshot);
                return self.report(false);
            }
        }

        match self.state {
            OperatingState::Init => {
                self.outputs.led = false;
                self.transition(OperatingState::Charging { since_ms: now }, now);
            }
            OperatingState::Charging { since_ms } => {
                self.outputs.set_charging(true);
                self.outputs.led = status::blink_led(now, timing.charging_blink_ms);

                if snapshot.supercaps_charged(&thresholds) {
                    self.transition(OperatingState::Ready { since_ms: now }, now);
                } else if now.wrapping_sub(since_ms) > timing.charge_timeout_ms {
                    warn!(
                        "charge incomplete after {=u32} ms: {=u32} / {=u32} mV",
                        now.wrapping_sub(since_ms),
                        snapshot.sc_voltage_pos_mv,
                        snapshot.sc_voltage_neg_mv
                    );
                    self.enter_fault(FaultCode::Timeout, now, snapshot);
                }
            }
            OperatingState::Ready { .. } => {
                self.outputs.set_charging(true);
                self.outputs.led = true;

                if snapshot.motor_starting(&thresholds) {
                    self.outputs.set_charging(false);
                    let progress = BoostProgress::start(&self.config.ramp, now);
                    self.transition(OperatingState::Boosting(progress), now);
                }
            }
            OperatingState::Boosting(mut progress) => {
                if inputs.zero_cross.pending {
                    consumed_zero_cross = true;
                    progress.on_zero_cross(&self.config.ramp);
                }

                let (pos, neg) = progress.duty_for(inputs.zero_cross.polarity);
                self.outputs.pwm_pos = pos;
                self.outputs.pwm_neg = neg;
                self.outputs.led = status::blink_led(now, timing.boosting_blink_ms);

                let dwell = progress.dwell_ms(now);
                let expired = dwell > timing.boost_max_ms;
                let started = !snapshot.motor_starting(&thresholds) && dwell > timing.startup_detect_ms;
                if expired || started {
                    self.outputs.disable_pwm();
                    self.transition(OperatingState::Cooldown { since_ms: now }, now);
                } else {
                    self.state = OperatingState::Boosting(progress);
                }
            }
            OperatingState::Cooldown { since_ms } => {
                self.outputs.disable_pwm();
                self.outputs.led = false;

                if now.wrapping_sub(since_ms) > timing.cooldown_ms {
                    self.transition(OperatingState::Charging { since_ms: now }, now);
                }
            }
            OperatingState::Fault(code) => {
                self.outputs.disable_pwm();
                self.outputs.set_charging(false);
                self.outputs.led = status::fault_led(code, now, timing.fault_blink_slot_ms);
            }
            OperatingState::Idle => {
                self.outputs.disable_pwm();
                self.outputs.set_charging(false);
                self.outputs.led = false;
            }
        }

        debug_assert!(self.outputs.is_interlocked());
        self.report(consumed_zero_cross)
    }

    fn transition(&mut self, next: OperatingState, now: u32) {
        info!(
            "{} -> {} at {=u32} ms",
            self.state.kind(),
            next.kind(),
            now
        );
        self.state = next;
    }

    fn enter_fault(&mut self, code: FaultCode, now: u32, snapshot: &MeasurementSnapshot) {
        error!(
            "fault {} in {} at {=u32} ms: {}",
            code,
            self.state.kind(),
            now,
            snapshot
        );
        self.outputs.disable_pwm();
        self.outputs.set_charging(false);
        self.state = OperatingState::Fault(code);
    }

    fn report(&self, consumed_zero_cross: bool) -> TickReport {
        TickReport {
            state: self.state.kind(),
            fault: self.state.fault(),
            outputs: self.outputs,
            consumed_zero_cross,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: OperatingState) {
        self.state = state;
    }
}
