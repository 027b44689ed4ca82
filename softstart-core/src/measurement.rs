//! Raw ADC counts to engineering units.

use crate::config::{ADC_MAX, ADC_VREF_MV, I_SENSE_COUNTS_PER_A, Thresholds, V_AC_RATIO, V_SC_RATIO};

/// Convert a 12-bit ADC count behind a resistive divider into millivolts.
///
/// `ratio_x100` is the divider ratio multiplied by 100. The result is not
/// clamped to the ADC range; it only saturates if it does not fit in `u32`.
pub fn convert_voltage(count: u16, ratio_x100: u32) -> u32 {
    let mv = count as u64 * ADC_VREF_MV as u64 * ratio_x100 as u64 / (ADC_MAX as u64 * 100);
    u32::try_from(mv).unwrap_or(u32::MAX)
}

/// Convert a current sense ADC count into milliamps.
pub fn convert_current(count: u16) -> u32 {
    count as u32 * 1000 / I_SENSE_COUNTS_PER_A
}

/// One set of ADC counts, read at the start of a control tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReadings {
    pub ac_voltage: u16,
    pub sc_voltage_pos: u16,
    pub sc_voltage_neg: u16,
    pub load_current: u16,
}

/// Engineering-unit view of one tick's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementSnapshot {
    /// AC line peak voltage.
    pub ac_voltage_mv: u32,
    pub sc_voltage_pos_mv: u32,
    pub sc_voltage_neg_mv: u32,
    pub load_current_ma: u32,
}

impl MeasurementSnapshot {
    pub fn from_raw(raw: &RawReadings) -> Self {
        Self {
            ac_voltage_mv: convert_voltage(raw.ac_voltage, V_AC_RATIO),
            sc_voltage_pos_mv: convert_voltage(raw.sc_voltage_pos, V_SC_RATIO),
            sc_voltage_neg_mv: convert_voltage(raw.sc_voltage_neg, V_SC_RATIO),
            load_current_ma: convert_current(raw.load_current),
        }
    }

    /// Both banks above the charged threshold at the same time.
    pub fn supercaps_charged(&self, thresholds: &Thresholds) -> bool {
        self.sc_voltage_pos_mv > thresholds.bank_charged_mv
            && self.sc_voltage_neg_mv > thresholds.bank_charged_mv
    }

    /// Single-sample motor start detection, no debouncing.
    pub fn motor_starting(&self, thresholds: &Thresholds) -> bool {
        self.load_current_ma > thresholds.motor_start_ma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_voltage_is_divider_scaled_reference() {
        assert_eq!(convert_voltage(4095, 10100), 333_300);
        assert_eq!(convert_voltage(4095, 8300), 273_900);
        assert_eq!(convert_voltage(0, 10100), 0);
    }

    #[test]
    fn voltage_does_not_clamp_above_adc_range() {
        assert!(convert_voltage(8190, 10100) > 333_300);
    }

    #[test]
    fn current_calibration_point() {
        assert_eq!(convert_current(310), 1000);
        assert_eq!(convert_current(0), 0);
        assert_eq!(convert_current(1551), 5003);
    }

    #[test]
    fn current_is_monotonic() {
        let mut last = 0;
        for count in 0..=4095 {
            let ma = convert_current(count);
            assert!(ma >= last, "count {count}");
            last = ma;
        }
    }

    #[test]
    fn snapshot_uses_per_channel_ratios() {
        let snapshot = MeasurementSnapshot::from_raw(&RawReadings {
            ac_voltage: 4095,
            sc_voltage_pos: 4095,
            sc_voltage_neg: 0,
            load_current: 310,
        });
        assert_eq!(snapshot.ac_voltage_mv, 333_300);
        assert_eq!(snapshot.sc_voltage_pos_mv, 273_900);
        assert_eq!(snapshot.sc_voltage_neg_mv, 0);
        assert_eq!(snapshot.load_current_ma, 1000);
    }

    fn banks(pos: u32, neg: u32) -> MeasurementSnapshot {
        MeasurementSnapshot {
            sc_voltage_pos_mv: pos,
            sc_voltage_neg_mv: neg,
            ..Default::default()
        }
    }

    #[test]
    fn charged_requires_both_banks() {
        let t = Thresholds::DEFAULT;
        assert!(banks(75_001, 75_001).supercaps_charged(&t));
        assert!(banks(80_000, 76_000).supercaps_charged(&t));
        assert!(!banks(74_999, 80_000).supercaps_charged(&t));
        assert!(!banks(80_000, 74_999).supercaps_charged(&t));
        assert!(!banks(0, 0).supercaps_charged(&t));
    }

    #[test]
    fn charged_threshold_is_strict() {
        assert!(!banks(75_000, 75_000).supercaps_charged(&Thresholds::DEFAULT));
    }

    #[test]
    fn motor_start_is_strictly_above_five_amps() {
        let t = Thresholds::DEFAULT;
        let load = |ma| MeasurementSnapshot {
            load_current_ma: ma,
            ..Default::default()
        };
        assert!(!load(5_000).motor_starting(&t));
        assert!(load(5_001).motor_starting(&t));
    }
}
