pub(crate) mod http_server;
pub(crate) mod network;

pub(crate) use http_server::http_server_task;
pub(crate) use network::{network_runner_task, wifi_connection_task};
