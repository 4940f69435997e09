pub mod headers;
pub mod request;
pub mod server;

pub use headers::{ContentType, ResponseHeaders, TargetWriter};
pub use request::{ParseError, SPEED_MARKER, parse_speed, request_text};
pub use server::{Connection, Listener, REQUEST_BUFFER_SIZE, RequestDispatcher};

use crate::motor::MotorError;

/// Fatal error of the serving loop.
#[derive(Debug)]
pub enum ServeError<T, P> {
    /// Accept, read or write failed.
    Transport(T),
    /// A driver input rejected its duty.
    Actuator(MotorError<P>),
    /// The response head did not fit its buffer.
    FormatHeaders,
}

impl<T, P> From<MotorError<P>> for ServeError<T, P> {
    fn from(err: MotorError<P>) -> Self {
        ServeError::Actuator(err)
    }
}

impl<T, P> From<core::fmt::Error> for ServeError<T, P> {
    fn from(_error: core::fmt::Error) -> Self {
        ServeError::FormatHeaders
    }
}
