//! embassy-net transport for the request dispatcher
//!
//! A single socket is created per connection and dropped after close, so the
//! port has one listener at a time and further clients are refused by the
//! stack while a request is being served.

use embassy_net::{
    Stack,
    tcp::{AcceptError, Error as TcpError, TcpSocket},
};
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use log::{debug, info};

use dcmotor_core::{Connection, Listener};

#[derive(Debug)]
pub(crate) enum TransportError {
    Accept(AcceptError),
    Tcp(TcpError),
}

impl embedded_io_async::Error for TransportError {
    fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Accept(_) => ErrorKind::Other,
            TransportError::Tcp(err) => embedded_io_async::Error::kind(err),
        }
    }
}

impl From<AcceptError> for TransportError {
    fn from(err: AcceptError) -> Self {
        TransportError::Accept(err)
    }
}

impl From<TcpError> for TransportError {
    fn from(err: TcpError) -> Self {
        TransportError::Tcp(err)
    }
}

/// Listens on all interfaces of the stack on a single port.
pub(crate) struct TcpListener<'b> {
    stack: Stack<'static>,
    port: u16,
    rx_buffer: &'b mut [u8],
    tx_buffer: &'b mut [u8],
}

impl<'b> TcpListener<'b> {
    pub(crate) fn new(
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &'b mut [u8],
        tx_buffer: &'b mut [u8],
    ) -> Self {
        Self {
            stack,
            port,
            rx_buffer,
            tx_buffer,
        }
    }
}

impl Listener for TcpListener<'_> {
    type Error = TransportError;
    type Connection<'a>
        = TcpConnection<'a>
    where
        Self: 'a;

    async fn accept(&mut self) -> Result<TcpConnection<'_>, TransportError> {
        let mut socket =
            TcpSocket::new(self.stack, &mut *self.rx_buffer, &mut *self.tx_buffer);
        socket.accept(self.port).await?;
        if let Some(remote) = socket.remote_endpoint() {
            info!("http: client connected: {}", remote);
        }
        Ok(TcpConnection { socket })
    }
}

/// Accepted client socket.
pub(crate) struct TcpConnection<'a> {
    socket: TcpSocket<'a>,
}

impl ErrorType for TcpConnection<'_> {
    type Error = TransportError;
}

impl Read for TcpConnection<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(self.socket.read(buf).await?)
    }
}

impl Write for TcpConnection<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        Ok(self.socket.write(buf).await?)
    }

    async fn flush(&mut self) -> Result<(), TransportError> {
        Ok(self.socket.flush().await?)
    }
}

impl Connection for TcpConnection<'_> {
    async fn close(&mut self) {
        self.socket.close();
        if let Err(e) = self.socket.flush().await {
            debug!("http: error closing connection: {:?}", e);
        }
    }
}
