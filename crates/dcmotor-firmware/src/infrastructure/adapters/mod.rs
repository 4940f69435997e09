pub(crate) mod tcp_listener;

pub(crate) use tcp_listener::{TcpListener, TransportError};
