#![feature(impl_trait_in_assoc_type)]
#![no_std]
#![no_main]

mod board;
mod heartbeat;
mod systick;
mod zero_cross;

use {defmt_rtt as _, panic_probe as _};

use crate::{board::Board, heartbeat::process as heartbeat_process, zero_cross::Detector};
use defmt::{info, unwrap};
use embassy_executor::{main, Spawner};
use embassy_stm32::{
    adc::{Adc, AdcChannel, Resolution, SampleTime},
    gpio::{Input, Level, Output, OutputType, Pull, Speed},
    time::hz,
    timer::{
        low_level::{CountingMode, OutputPolarity},
        simple_pwm::{PwmPin, SimplePwm},
    },
    wdg::IndependentWatchdog,
    Config as DeviceConfig,
};
use embassy_time::Timer;
use softstart_core::{
    config::{CONTROL_PERIOD_MS, PWM_FREQ_HZ, SYSCLK_HZ},
    Actuators, Controller, SharedSignals,
};

/// Written by the SysTick and EXTI0_1 handlers, read by the control loop.
pub static SIGNALS: SharedSignals = SharedSignals::new();

/// Sense dividers and filters settle before the first sample is trusted.
const ANALOG_SETTLE_MS: u32 = 10;

#[main]
async fn main(spawner: Spawner) {
    // HSI16 straight to SYSCLK, no PLL
    let mut config = DeviceConfig::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hsi = Some(Hsi {
            sys_div: HsiSysDiv::DIV1,
        });
        config.rcc.sys = Sysclk::HSISYS;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV1;
    }
    let dev = embassy_stm32::init(config);

    // Power stage off before anything else
    let charge_pos = Output::new(dev.PA5, Level::Low, Speed::Low);
    let charge_neg = Output::new(dev.PA8, Level::Low, Speed::Low);
    let led = Output::new(dev.PA11, Level::Low, Speed::Low);

    let pwm = SimplePwm::new(
        dev.TIM3,
        Some(PwmPin::new(dev.PA6, OutputType::PushPull)),
        Some(PwmPin::new(dev.PA7, OutputType::PushPull)),
        None,
        None,
        hz(PWM_FREQ_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let mut pwm = pwm.split();
    pwm.ch1.set_polarity(OutputPolarity::ActiveHigh);
    pwm.ch2.set_polarity(OutputPolarity::ActiveHigh);
    pwm.ch1.set_duty_cycle_fully_off();
    pwm.ch2.set_duty_cycle_fully_off();
    pwm.ch1.enable();
    pwm.ch2.enable();

    let actuators = Actuators::new(charge_pos, charge_neg, led, pwm.ch1, pwm.ch2);

    // Configure watchdog
    let mut dog = IndependentWatchdog::new(dev.IWDG, 100_000);
    dog.unleash();

    let mut cp = unwrap!(cortex_m::Peripherals::take());
    systick::start(&mut cp.SYST, SYSCLK_HZ);

    // AC_SENSE PA1, SC_POS PA2, SC_NEG PA3, I_SENSE PA4
    let mut adc = Adc::new(dev.ADC1);
    adc.set_resolution(Resolution::BITS12);
    adc.set_sample_time(SampleTime::CYCLES12_5);
    let mut board = Board::new(
        adc,
        dev.PA1.degrade_adc(),
        dev.PA2.degrade_adc(),
        dev.PA3.degrade_adc(),
        dev.PA4.degrade_adc(),
        actuators,
        &SIGNALS,
    );
    SIGNALS.delay_ms(ANALOG_SETTLE_MS);
    dog.pet();

    // Zero-cross detector on PA0
    let _zero_cross = Detector::new(Input::new(dev.PA0, Pull::Down));
    unwrap!(spawner.spawn(heartbeat_process(&SIGNALS)));

    info!("System startup");
    let mut controller = Controller::default();
    loop {
        let report = controller.tick(&mut board);
        heartbeat::publish(&report);
        dog.pet();
        Timer::after_millis(CONTROL_PERIOD_MS).await;
    }
}
