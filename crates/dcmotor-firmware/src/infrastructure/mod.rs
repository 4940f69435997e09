//! Infrastructure layer
//!
//! Concrete hardware and network implementations behind the motor core:
//! LEDC PWM channels, the `WiFi` station and the embassy-net TCP listener.

pub(crate) mod adapters;
pub(crate) mod config;
pub(crate) mod drivers;
pub(crate) mod tasks;
