use embedded_hal::pwm::SetDutyCycle;
use embedded_io_async::{ErrorType, Read, Write};
use heapless::String;
use log::{debug, info};

use super::{
    ServeError,
    headers::{ContentType, ResponseHeaders, TargetWriter as _},
    request::{parse_speed, request_text},
};
use crate::motor::{MotorController, MotorError};

/// Upper bound of a request, read in one call.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

const RESPONSE_HEAD_SIZE: usize = 64;

/// Client connection handed out by a [`Listener`].
#[allow(async_fn_in_trait)]
pub trait Connection: Read + Write {
    /// Close the connection. Errors while closing are not reported.
    async fn close(&mut self);
}

/// Listening side of the transport.
///
/// Implementations hold a single listening socket, so at most one client
/// is served at a time.
#[allow(async_fn_in_trait)]
pub trait Listener {
    type Error: core::fmt::Debug;
    type Connection<'a>: Connection + ErrorType<Error = Self::Error>
    where
        Self: 'a;

    /// Wait for the next client.
    async fn accept(&mut self) -> Result<Self::Connection<'_>, Self::Error>;
}

/// Serves the control page and applies speed requests, one client at a time.
///
/// Every connection goes through accept, a single bounded read, dispatch,
/// the fixed response and close. Transport and actuator errors end the
/// serving loop; a malformed speed value does not.
pub struct RequestDispatcher<P> {
    motor: MotorController<P>,
    page: &'static [u8],
}

impl<P: SetDutyCycle> RequestDispatcher<P> {
    pub fn new(motor: MotorController<P>, page: &'static [u8]) -> Self {
        Self { motor, page }
    }

    pub fn motor(&self) -> &MotorController<P> {
        &self.motor
    }

    pub fn motor_mut(&mut self) -> &mut MotorController<P> {
        &mut self.motor
    }

    /// Serve clients until the first fatal error and return it.
    pub async fn serve_forever<L: Listener>(
        &mut self,
        listener: &mut L,
    ) -> ServeError<L::Error, P::Error> {
        loop {
            if let Err(e) = self.serve_once(listener).await {
                return e;
            }
        }
    }

    /// Accept one client, handle its request and close the connection.
    ///
    /// The connection is closed whether or not handling succeeded.
    pub async fn serve_once<L: Listener>(
        &mut self,
        listener: &mut L,
    ) -> Result<(), ServeError<L::Error, P::Error>> {
        let mut conn = listener.accept().await.map_err(ServeError::Transport)?;
        let result = self.handle(&mut conn).await;
        conn.close().await;
        result
    }

    async fn handle<C: Read + Write>(
        &mut self,
        conn: &mut C,
    ) -> Result<(), ServeError<C::Error, P::Error>> {
        let mut buf = [0u8; REQUEST_BUFFER_SIZE];
        // Single read: a request split across several segments is cut short.
        let n = conn.read(&mut buf).await.map_err(ServeError::Transport)?;
        self.dispatch(request_text(&buf[..n]))?;
        self.respond(conn).await
    }

    fn dispatch(&mut self, request: &str) -> Result<(), MotorError<P::Error>> {
        match parse_speed(request) {
            Some(Ok(speed)) => {
                info!("http: speed received: {}", speed);
                self.motor.set(speed)
            }
            // Malformed values leave the motor untouched, the page is still served.
            Some(Err(e)) => {
                debug!("http: speed discarded: {:?}", e);
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn respond<C: Write>(
        &self,
        conn: &mut C,
    ) -> Result<(), ServeError<C::Error, P::Error>> {
        let mut head = String::<RESPONSE_HEAD_SIZE>::new();
        ResponseHeaders::success()
            .with_content_type(ContentType::TextHtml)
            .write_to(&mut head)?;

        conn.write_all(head.as_bytes())
            .await
            .map_err(ServeError::Transport)?;
        conn.write_all(self.page)
            .await
            .map_err(ServeError::Transport)?;
        conn.flush().await.map_err(ServeError::Transport)
    }
}
