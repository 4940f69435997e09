//! DC motor control over a dual-input driver
//!
//! The driver (L9110S and similar H-bridges) has two inputs. Duty on input A
//! turns the motor forward, duty on input B turns it in reverse, and both
//! inputs low lets it coast. Both inputs active at once is not a valid driver
//! state, so [`MotorController`] never produces it.

use embedded_hal::pwm::SetDutyCycle;

/// Full-scale duty of a 16-bit PWM channel.
pub const DUTY_MAX: u16 = u16::MAX;

/// Full-scale speed, in percent.
pub const SPEED_MAX: i32 = 100;

/// Rotation direction as seen on the driver inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    Stopped,
}

/// Driver input that failed to accept a duty write.
#[derive(Debug)]
pub enum MotorError<E> {
    ChannelA(E),
    ChannelB(E),
}

/// Duty pair for both driver inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand {
    pub duty_a: u16,
    pub duty_b: u16,
}

impl MotorCommand {
    /// Both inputs low.
    pub const STOP: Self = Self {
        duty_a: 0,
        duty_b: 0,
    };

    /// Map a signed speed in percent to the input duties.
    ///
    /// Speeds outside of `-100..=100` go through the same scaling and
    /// saturate at the 16-bit duty range. The scaled duty is truncated toward
    /// zero, so `50` maps to `32767`.
    pub fn from_speed(speed: i32, invert: bool) -> Self {
        let speed = i64::from(speed);
        let effective = if invert { -speed } else { speed };

        match effective {
            0 => Self::STOP,
            v if v > 0 => Self {
                duty_a: scale_duty(v),
                duty_b: 0,
            },
            v => Self {
                duty_a: 0,
                duty_b: scale_duty(-v),
            },
        }
    }

    /// Direction implied by the duties.
    pub fn direction(&self) -> Direction {
        match (self.duty_a, self.duty_b) {
            (0, 0) => Direction::Stopped,
            (_, 0) => Direction::Forward,
            _ => Direction::Reverse,
        }
    }
}

fn scale_duty(percent: i64) -> u16 {
    let duty = percent * i64::from(DUTY_MAX) / i64::from(SPEED_MAX);
    u16::try_from(duty).unwrap_or(DUTY_MAX)
}

/// Speed and direction control for one DC motor.
///
/// Owns both PWM channels of the driver and the direction inversion flag.
/// It is not shared: the serving task that owns it is the only writer.
pub struct MotorController<P> {
    channel_a: P,
    channel_b: P,
    invert: bool,
    speed: i32,
    command: MotorCommand,
}

impl<P: SetDutyCycle> MotorController<P> {
    /// Take over both channels and drive them to zero duty.
    pub fn new(
        channel_a: P,
        channel_b: P,
        invert: bool,
    ) -> Result<Self, MotorError<P::Error>> {
        let mut controller = Self {
            channel_a,
            channel_b,
            invert,
            speed: 0,
            command: MotorCommand::STOP,
        };
        controller.write(MotorCommand::STOP)?;
        Ok(controller)
    }

    /// Set the motor speed in percent, negative values run it in reverse.
    ///
    /// A failed channel write leaves the driver in an unknown state and is
    /// returned to the caller, the commanded speed is not updated.
    pub fn set(&mut self, speed: i32) -> Result<(), MotorError<P::Error>> {
        self.write(MotorCommand::from_speed(speed, self.invert))?;
        self.speed = speed;
        Ok(())
    }

    /// Let the motor coast.
    pub fn stop(&mut self) -> Result<(), MotorError<P::Error>> {
        self.set(0)
    }

    /// Last successfully commanded speed.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Duties currently applied to the driver inputs.
    ///
    /// After a failed write this is the half-written state: the released
    /// input reads zero, the input that rejected its duty keeps its old value.
    pub fn command(&self) -> MotorCommand {
        self.command
    }

    pub fn direction(&self) -> Direction {
        self.command.direction()
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    fn write(&mut self, command: MotorCommand) -> Result<(), MotorError<P::Error>> {
        // The input going to zero is released first. `self.command` tracks
        // every completed write, so it stays accurate after a partial failure.
        if command.duty_a == 0 {
            write_duty(&mut self.channel_a, 0).map_err(MotorError::ChannelA)?;
            self.command.duty_a = 0;
            write_duty(&mut self.channel_b, command.duty_b)
                .map_err(MotorError::ChannelB)?;
            self.command.duty_b = command.duty_b;
        } else {
            write_duty(&mut self.channel_b, 0).map_err(MotorError::ChannelB)?;
            self.command.duty_b = 0;
            write_duty(&mut self.channel_a, command.duty_a)
                .map_err(MotorError::ChannelA)?;
            self.command.duty_a = command.duty_a;
        }
        Ok(())
    }
}

/// Write a 16-bit duty, rescaled to the channel resolution.
fn write_duty<P: SetDutyCycle>(channel: &mut P, duty: u16) -> Result<(), P::Error> {
    channel.set_duty_cycle_fraction(duty, DUTY_MAX)
}
