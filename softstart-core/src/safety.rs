//! Operating envelope monitor.
//!
//! Checks run in a fixed order and the first violation wins. A single
//! out-of-range sample trips; there is no filtering.

use crate::{config::Limits, measurement::MeasurementSnapshot, state::FaultCode};

pub fn check_envelope(snapshot: &MeasurementSnapshot, limits: &Limits) -> Result<(), FaultCode> {
    if snapshot.ac_voltage_mv < limits.ac_min_mv {
        return Err(FaultCode::Undervoltage);
    }
    if snapshot.ac_voltage_mv > limits.ac_max_mv {
        return Err(FaultCode::Overvoltage);
    }
    if snapshot.sc_voltage_pos_mv > limits.bank_max_mv
        || snapshot.sc_voltage_neg_mv > limits.bank_max_mv
    {
        return Err(FaultCode::SupercapOvervoltage);
    }
    if snapshot.load_current_ma > limits.load_max_ma {
        return Err(FaultCode::Overcurrent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> MeasurementSnapshot {
        MeasurementSnapshot {
            ac_voltage_mv: 170_000,
            sc_voltage_pos_mv: 60_000,
            sc_voltage_neg_mv: 60_000,
            load_current_ma: 1_000,
        }
    }

    #[test]
    fn nominal_passes() {
        assert_eq!(check_envelope(&nominal(), &Limits::DEFAULT), Ok(()));
    }

    #[test]
    fn envelope_edges_are_inclusive() {
        let limits = Limits::DEFAULT;
        let mut s = nominal();
        s.ac_voltage_mv = 90_000;
        s.sc_voltage_pos_mv = 85_000;
        s.sc_voltage_neg_mv = 85_000;
        s.load_current_ma = 40_000;
        assert_eq!(check_envelope(&s, &limits), Ok(()));
        s.ac_voltage_mv = 200_000;
        assert_eq!(check_envelope(&s, &limits), Ok(()));
    }

    #[test]
    fn each_violation_maps_to_its_code() {
        let limits = Limits::DEFAULT;

        let mut s = nominal();
        s.ac_voltage_mv = 89_999;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::Undervoltage));

        let mut s = nominal();
        s.ac_voltage_mv = 200_001;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::Overvoltage));

        let mut s = nominal();
        s.sc_voltage_neg_mv = 85_001;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::SupercapOvervoltage));

        let mut s = nominal();
        s.sc_voltage_pos_mv = 85_001;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::SupercapOvervoltage));

        let mut s = nominal();
        s.load_current_ma = 40_001;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::Overcurrent));
    }

    #[test]
    fn first_violation_wins() {
        let limits = Limits::DEFAULT;
        let everything_wrong = MeasurementSnapshot {
            ac_voltage_mv: 10_000,
            sc_voltage_pos_mv: 90_000,
            sc_voltage_neg_mv: 90_000,
            load_current_ma: 50_000,
        };
        assert_eq!(
            check_envelope(&everything_wrong, &limits),
            Err(FaultCode::Undervoltage)
        );

        let mut s = everything_wrong;
        s.ac_voltage_mv = 250_000;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::Overvoltage));

        s.ac_voltage_mv = 170_000;
        assert_eq!(check_envelope(&s, &limits), Err(FaultCode::SupercapOvervoltage));
    }
}
