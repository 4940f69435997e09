#![no_std]

//! Web-controlled DC motor core
//!
//! - `motor` - signed speed to PWM duty mapping for a dual-input driver
//! - `http` - one-client-at-a-time request dispatcher serving the control page
//!
//! Both are generic over their hardware: PWM channels through
//! [`embedded_hal::pwm::SetDutyCycle`], the network through the
//! [`Listener`] and [`Connection`] traits.

pub mod http;
pub mod motor;

pub use http::{Connection, Listener, RequestDispatcher, ServeError};
pub use motor::{Direction, MotorCommand, MotorController, MotorError};
