use embassy_time::{Duration, Timer};
use esp_hal::{
    gpio::{DriveMode, Level, Output, OutputConfig, OutputPin},
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{self, ChannelIFace},
        timer::{self, TimerIFace},
    },
    peripherals::LEDC,
    time::Rate,
};
use log::info;

use dcmotor_core::MotorController;

use crate::infrastructure::config;

/// LEDC channel driving one input of the motor driver
pub(crate) type MotorChannel = channel::Channel<'static, LowSpeed>;

/// Bring up the motor driver in a stopped state.
///
/// Both inputs are first driven low as plain outputs and held for the settle
/// time, then handed to LEDC at 0% duty with a 15-bit, 1 kHz timer.
pub(crate) async fn init_motor(
    ledc: LEDC<'static>,
    pin_a: impl OutputPin + 'static,
    pin_b: impl OutputPin + 'static,
) -> MotorController<MotorChannel> {
    let pin_a = Output::new(pin_a, Level::Low, OutputConfig::default());
    let pin_b = Output::new(pin_b, Level::Low, OutputConfig::default());
    Timer::after(Duration::from_millis(config::MOTOR.settle_ms)).await;

    let mut ledc = Ledc::new(ledc);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    let ledc: &'static Ledc<'static> = mk_static!(Ledc<'static>, ledc);

    let pwm_timer = mk_static!(
        timer::Timer<'static, LowSpeed>,
        ledc.timer::<LowSpeed>(timer::Number::Timer0)
    );
    pwm_timer
        .configure(timer::config::Config {
            // At 16 bits LEDC reports a full scale of 0, so every duty rescales to 0
            duty: timer::config::Duty::Duty15Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(config::MOTOR.pwm_frequency_hz),
        })
        .expect("motor: failed to configure PWM timer");
    let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

    // The pins keep their low level until LEDC drives them
    let channel_a = init_channel(ledc, pwm_timer, channel::Number::Channel0, pin_a);
    let channel_b = init_channel(ledc, pwm_timer, channel::Number::Channel1, pin_b);

    let motor = MotorController::new(channel_a, channel_b, config::MOTOR.invert)
        .expect("motor: failed to stop driver inputs");
    info!(
        "motor: ready, {} Hz, inverted: {}",
        config::MOTOR.pwm_frequency_hz,
        motor.is_inverted()
    );
    motor
}

fn init_channel(
    ledc: &'static Ledc<'static>,
    pwm_timer: &'static timer::Timer<'static, LowSpeed>,
    number: channel::Number,
    pin: Output<'static>,
) -> MotorChannel {
    let mut channel = ledc.channel(number, pin.into_peripheral_output());
    channel
        .configure(channel::config::Config {
            timer: pwm_timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        })
        .expect("motor: failed to configure PWM channel");
    channel
}
