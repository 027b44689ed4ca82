//! Board calibration, operating envelope and timing.

use static_assertions::const_assert;

/// Core clock, HSI16 without PLL.
pub const SYSCLK_HZ: u32 = 16_000_000;
/// Discharge switch PWM frequency.
pub const PWM_FREQ_HZ: u32 = 20_000;
/// Discharge PWM period in timer counts (800).
pub const PWM_PERIOD: u16 = (SYSCLK_HZ / PWM_FREQ_HZ) as u16;

/// ADC reference voltage.
pub const ADC_VREF_MV: u32 = 3300;
/// Full-scale 12-bit ADC count.
pub const ADC_MAX: u32 = 4095;

/// AC sense divider 1M / 10k = 101:1, scaled by 100.
pub const V_AC_RATIO: u32 = 10100;
/// Supercap sense divider 820k / 10k = 83:1, scaled by 100.
pub const V_SC_RATIO: u32 = 8300;
/// 5 mOhm shunt with 50 V/V gain: 250 mV/A.
pub const I_SENSE_COUNTS_PER_A: u32 = 310;

/// Control loop iteration interval.
pub const CONTROL_PERIOD_MS: u64 = 1;

/// Operating envelope enforced by the safety monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Limits {
    /// AC peak voltage floor.
    pub ac_min_mv: u32,
    /// AC peak voltage ceiling.
    pub ac_max_mv: u32,
    /// Maximum voltage of either supercap bank.
    pub bank_max_mv: u32,
    /// Maximum load current.
    pub load_max_ma: u32,
}

impl Limits {
    pub const DEFAULT: Self = Self {
        ac_min_mv: 90_000,
        ac_max_mv: 200_000,
        bank_max_mv: 85_000,
        load_max_ma: 40_000,
    };
}

/// Decision thresholds of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Both banks must be strictly above this to count as charged.
    pub bank_charged_mv: u32,
    /// Load current strictly above this means the motor is starting.
    pub motor_start_ma: u32,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        bank_charged_mv: 75_000,
        motor_start_ma: 5_000,
    };
}

/// Dwell limits and LED cadence, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub charge_timeout_ms: u32,
    pub boost_max_ms: u32,
    /// Minimum boost dwell before a current drop ends the boost.
    pub startup_detect_ms: u32,
    pub cooldown_ms: u32,
    /// Half period of the charging blink.
    pub charging_blink_ms: u32,
    /// Half period of the boosting blink.
    pub boosting_blink_ms: u32,
    /// Length of one slot of the fault blink pattern.
    pub fault_blink_slot_ms: u32,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        charge_timeout_ms: 120_000,
        boost_max_ms: 500,
        startup_detect_ms: 50,
        cooldown_ms: 1_000,
        charging_blink_ms: 500,
        boosting_blink_ms: 50,
        fault_blink_slot_ms: 200,
    };
}

/// Boost duty ramp in PWM counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    /// Duty applied on entry to boosting.
    pub start: u16,
    /// Increment per consumed zero crossing.
    pub step: u16,
    /// The duty never rises above this.
    pub ceiling: u16,
}

impl Ramp {
    /// 50 % start, 5 % step, 80 % ceiling of `period`.
    pub const fn for_period(period: u16) -> Self {
        let period = period as u32;
        Self {
            start: (period / 2) as u16,
            step: (period / 20) as u16,
            ceiling: (period * 8 / 10) as u16,
        }
    }

    pub const DEFAULT: Self = Self::for_period(PWM_PERIOD);
}

/// Complete controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub limits: Limits,
    pub thresholds: Thresholds,
    pub timing: Timing,
    pub ramp: Ramp,
}

impl Config {
    pub const DEFAULT: Self = Self {
        limits: Limits::DEFAULT,
        thresholds: Thresholds::DEFAULT,
        timing: Timing::DEFAULT,
        ramp: Ramp::DEFAULT,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const_assert!(PWM_PERIOD as u32 == SYSCLK_HZ / PWM_FREQ_HZ);
const_assert!(Ramp::DEFAULT.start <= Ramp::DEFAULT.ceiling);
const_assert!(Ramp::DEFAULT.ceiling <= PWM_PERIOD);
const_assert!(Ramp::DEFAULT.step > 0);
const_assert!(Thresholds::DEFAULT.bank_charged_mv < Limits::DEFAULT.bank_max_mv);
const_assert!(Thresholds::DEFAULT.motor_start_ma < Limits::DEFAULT.load_max_ma);
const_assert!(Limits::DEFAULT.ac_min_mv < Limits::DEFAULT.ac_max_mv);
