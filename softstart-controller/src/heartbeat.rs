//! Periodic status line over RTT.

use core::sync::atomic::Ordering;
use defmt::info;
use embassy_executor::task;
use embassy_time::{Duration, Ticker};
use softstart_core::{AtomicFaultCode, AtomicStateKind, FaultCode, SharedSignals, StateKind, TickReport};

pub static STATE: AtomicStateKind = AtomicStateKind::new(StateKind::Init);
pub static FAULT: AtomicFaultCode = AtomicFaultCode::new(FaultCode::None);

/// Called by the control loop after every tick.
pub fn publish(report: &TickReport) {
    STATE.store(report.state, Ordering::Relaxed);
    FAULT.store(report.fault, Ordering::Relaxed);
}

#[task]
pub async fn process(signals: &'static SharedSignals) {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        info!(
            "t={=u32} ms state={} fault={}",
            signals.now_millis(),
            STATE.load(Ordering::Relaxed),
            FAULT.load(Ordering::Relaxed)
        );
    }
}
