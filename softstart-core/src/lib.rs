//! Supercapacitor soft-start controller core.
//!
//! Discharges two supercap banks in step with the AC line to help a large
//! single-phase motor start, then recharges them. Everything here is
//! hardware-agnostic; the board supplies a [`SoftStartHal`] and drives
//! [`Controller::tick`] from its control loop.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod actuators;
pub mod boost;
pub mod config;
pub mod controller;
pub mod hal;
pub mod machine;
pub mod measurement;
pub mod safety;
pub mod signals;
pub mod state;
pub mod status;

pub use actuators::Actuators;
pub use boost::{BoostProgress, Polarity, ZeroCrossEvent};
pub use config::Config;
pub use controller::Controller;
pub use hal::{Bank, SenseChannel, SoftStartHal};
pub use machine::{Inputs, OutputImage, SoftStart, TickReport};
pub use measurement::{MeasurementSnapshot, RawReadings, convert_current, convert_voltage};
pub use signals::SharedSignals;
pub use state::{AtomicFaultCode, AtomicStateKind, FaultCode, OperatingState, StateKind};
