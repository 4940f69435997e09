mod motor;
mod network;

pub(crate) use motor::{MotorChannel, init_motor};
pub(crate) use network::{init_network_stack, wait_for_connection};
