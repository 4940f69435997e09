//! Test doubles for the driver inputs and the network.

#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use dcmotor_core::{Connection, Listener};
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_io_async::{ErrorType, Read, Write};

// -----------------------------------------------------------------------------
// PWM
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    A,
    B,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PwmFault;

impl pwm::Error for PwmFault {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// Every duty written to either input, in order.
#[derive(Debug, Default)]
pub struct DriverLog {
    pub writes: Vec<(Input, u16)>,
    pub fail_on: Option<Input>,
}

impl DriverLog {
    /// Current duty of both inputs as (A, B).
    pub fn duties(&self) -> (u16, u16) {
        let last = |input| {
            self.writes
                .iter()
                .rev()
                .find(|(i, _)| *i == input)
                .map(|(_, duty)| *duty)
                .unwrap_or(0)
        };
        (last(Input::A), last(Input::B))
    }

    /// Replays the writes and reports whether both inputs were ever active
    /// together.
    pub fn ever_both_active(&self) -> bool {
        let (mut a, mut b) = (0u16, 0u16);
        for (input, duty) in &self.writes {
            match input {
                Input::A => a = *duty,
                Input::B => b = *duty,
            }
            if a != 0 && b != 0 {
                return true;
            }
        }
        false
    }
}

pub struct MockPwm {
    input: Input,
    max_duty: u16,
    log: Rc<RefCell<DriverLog>>,
}

impl pwm::ErrorType for MockPwm {
    type Error = PwmFault;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PwmFault> {
        let mut log = self.log.borrow_mut();
        if log.fail_on == Some(self.input) {
            return Err(PwmFault);
        }
        log.writes.push((self.input, duty));
        Ok(())
    }
}

/// Two 16-bit inputs sharing one log.
pub fn mock_driver() -> (MockPwm, MockPwm, Rc<RefCell<DriverLog>>) {
    mock_driver_with_max(u16::MAX)
}

pub fn mock_driver_with_max(max_duty: u16) -> (MockPwm, MockPwm, Rc<RefCell<DriverLog>>) {
    let log = Rc::new(RefCell::new(DriverLog::default()));
    let a = MockPwm {
        input: Input::A,
        max_duty,
        log: log.clone(),
    };
    let b = MockPwm {
        input: Input::B,
        max_duty,
        log: log.clone(),
    };
    (a, b, log)
}

// -----------------------------------------------------------------------------
// Network
// -----------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub struct NetFault;

impl embedded_io::Error for NetFault {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// What one client sent and received.
#[derive(Debug, Default)]
pub struct Exchange {
    pub request: Vec<u8>,
    pub response: Vec<u8>,
    pub reads: usize,
    pub closed: bool,
    pub fail_read: bool,
    pub fail_write: bool,
}

impl Exchange {
    pub fn response_str(&self) -> &str {
        std::str::from_utf8(&self.response).unwrap()
    }
}

/// Hands out queued clients; fails once the queue is empty.
#[derive(Default)]
pub struct MockListener {
    clients: VecDeque<Rc<RefCell<Exchange>>>,
}

impl MockListener {
    pub fn connect(&mut self, request: &[u8]) -> Rc<RefCell<Exchange>> {
        self.connect_with(Exchange {
            request: request.to_vec(),
            ..Exchange::default()
        })
    }

    pub fn connect_with(&mut self, exchange: Exchange) -> Rc<RefCell<Exchange>> {
        let exchange = Rc::new(RefCell::new(exchange));
        self.clients.push_back(exchange.clone());
        exchange
    }
}

impl Listener for MockListener {
    type Error = NetFault;
    type Connection<'a>
        = MockConnection
    where
        Self: 'a;

    async fn accept(&mut self) -> Result<MockConnection, NetFault> {
        self.clients
            .pop_front()
            .map(|exchange| MockConnection {
                exchange,
                offset: 0,
            })
            .ok_or(NetFault)
    }
}

pub struct MockConnection {
    exchange: Rc<RefCell<Exchange>>,
    offset: usize,
}

impl ErrorType for MockConnection {
    type Error = NetFault;
}

impl Read for MockConnection {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, NetFault> {
        let mut exchange = self.exchange.borrow_mut();
        exchange.reads += 1;
        if exchange.fail_read {
            return Err(NetFault);
        }
        let remaining = &exchange.request[self.offset..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.offset += n;
        Ok(n)
    }
}

impl Write for MockConnection {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, NetFault> {
        let mut exchange = self.exchange.borrow_mut();
        if exchange.fail_write {
            return Err(NetFault);
        }
        exchange.response.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), NetFault> {
        Ok(())
    }
}

impl Connection for MockConnection {
    async fn close(&mut self) {
        self.exchange.borrow_mut().closed = true;
    }
}
