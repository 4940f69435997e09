//! Control page HTTP server task
//!
//! Owns the request dispatcher and with it the motor. Any fatal error stops
//! the motor and halts the firmware.

use embassy_net::Stack;
use log::{error, info};

use dcmotor_core::RequestDispatcher;

use crate::infrastructure::{adapters::TcpListener, config, drivers::MotorChannel};

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 4096;

#[embassy_executor::task]
pub(crate) async fn http_server_task(
    stack: Stack<'static>,
    mut dispatcher: RequestDispatcher<MotorChannel>,
) {
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];
    let mut listener =
        TcpListener::new(stack, config::HTTP.port, &mut rx_buffer, &mut tx_buffer);

    if let Some(ip) = stack.config_v4() {
        info!("http: serving on http://{}", ip.address.address());
    }

    let err = dispatcher.serve_forever(&mut listener).await;
    error!("http: server stopped: {:?}", err);

    if let Err(e) = dispatcher.motor_mut().stop() {
        error!("http: failed to stop motor: {:?}", e);
    }
    panic!("http server stopped");
}
