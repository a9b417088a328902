//! Serial transport for the CL-200A.
//!
//! [`SerialLink`] is the seam between the protocol driver and the wire: the
//! driver only needs paced blocking writes, a line-oriented read and buffer
//! resets. [`PortSession`] implements it over a real port; tests implement
//! it over canned byte queues.

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, DataBits, Parity, SerialPort, StopBits};

use crate::common::error::Cl200Error;
use crate::common::timing;

/// Blocking serial primitives required by the protocol driver.
///
/// Implementations carry no protocol knowledge; pacing and buffer-reset
/// sequencing are dictated by the caller.
pub trait SerialLink {
    /// Sends raw bytes, failing on any transport rejection.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Cl200Error>;

    /// Blocks until a LF terminator or the read timeout, returning whatever
    /// accumulated. An empty result means nothing arrived before the
    /// timeout, which callers treat as a lost connection.
    fn read_line(&mut self) -> Result<Vec<u8>, Cl200Error>;

    /// Discards pending input.
    fn clear_input(&mut self) -> Result<(), Cl200Error>;

    /// Discards both pending input and unsent output before a new
    /// command/response cycle, so commands cannot cross-talk.
    fn clear_buffers(&mut self) -> Result<(), Cl200Error>;

    /// Mandatory settling delay after certain writes. Not cancellable.
    fn pace(&mut self, settle: Duration);
}

/// Exclusive owner of an open serial handle, configured for the CL-200A:
/// 9600 baud, 7 data bits, even parity, 1 stop bit. The handle is released
/// when the session is dropped.
pub struct PortSession {
    port: Box<dyn SerialPort>,
}

impl PortSession {
    /// Opens `port_name` with the instrument's line parameters and the
    /// protocol read timeout.
    pub fn open(port_name: &str) -> Result<Self, Cl200Error> {
        let port = serialport::new(port_name, timing::BAUD_RATE)
            .data_bits(DataBits::Seven)
            .parity(Parity::Even)
            .stop_bits(StopBits::One)
            .timeout(timing::READ_TIMEOUT)
            .open()?;
        log::debug!("opened serial port {port_name} at {} 7E1", timing::BAUD_RATE);
        Ok(PortSession { port })
    }
}

impl SerialLink for PortSession {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Cl200Error> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Vec<u8>, Cl200Error> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        let deadline = Instant::now() + timing::READ_TIMEOUT;

        loop {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) => return Err(Cl200Error::Io(e)),
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        Ok(line)
    }

    fn clear_input(&mut self) -> Result<(), Cl200Error> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn clear_buffers(&mut self) -> Result<(), Cl200Error> {
        self.port.clear(ClearBuffer::All)?;
        Ok(())
    }

    fn pace(&mut self, settle: Duration) {
        if !settle.is_zero() {
            thread::sleep(settle);
        }
    }
}
