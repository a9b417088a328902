//! The CL-200A driver proper: session state machine plus measurements.
//!
//! The instrument refuses measurement commands until it has been walked
//! through PC-connection mode (command 54), Hold status (55) and EXT mode
//! (40), in that order. [`Cl200a::new`] performs the whole bring-up; the
//! individual transitions stay public for callers that need to renegotiate
//! a mode after an instrument-side error.

pub mod measure;

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::common::command::Command;
use crate::common::error::Cl200Error;
use crate::common::response::DecodedResponse;
use crate::common::{frame, timing};
use crate::transport::SerialLink;

pub use measure::{ColorTemperature, IlluminanceChromaticity, IlluminanceUv, Tristimulus};

/// Session position in the instrument's mode sequence. Transitions are
/// driven only by this driver; exactly one state holds at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    PcConnected,
    Held,
    ExtModeReady,
}

/// A connected CL-200A instrument over some serial link.
///
/// Strictly half-duplex and blocking: one outstanding command at a time,
/// with suspension only at the serial read boundary. Callers issuing
/// commands from several threads must serialize access themselves.
pub struct Cl200a<L: SerialLink> {
    link: L,
    state: ConnectionState,
}

impl<L: SerialLink> Cl200a<L> {
    /// Brings the instrument up: PC connection, Hold status, EXT mode.
    ///
    /// A failed PC-connection handshake does not abort bring-up; the hold
    /// and EXT transitions are attempted regardless, and EXT mode will
    /// surface a fatal status if the instrument really is not listening.
    pub fn new(link: L) -> Result<Self, Cl200Error> {
        let mut device = Cl200a {
            link,
            state: ConnectionState::Disconnected,
        };
        if !device.connect()? {
            warn!("PC connection handshake failed, continuing bring-up anyway");
        }
        device.hold_mode()?;
        device.ext_mode()?;
        Ok(device)
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Encodes and sends `command`, paces for `settle`, then drains input.
    ///
    /// Draining after the pace is part of the exchange discipline: it throws
    /// away the settling-period echo (notably the trigger acknowledgment) so
    /// the next read sees only the response that actually matters.
    fn send_paced(&mut self, command: Command, settle: Duration) -> Result<(), Cl200Error> {
        let frame = frame::encode(command.payload());
        debug!("sending command {} payload {:?}", command.number(), command.payload());
        self.link.write_all(&frame)?;
        self.link.pace(settle);
        self.link.clear_input()?;
        Ok(())
    }

    /// Switches the instrument to PC connection mode (command 54).
    ///
    /// Up to [`timing::CONNECT_ATTEMPTS`] paced transmissions, each followed
    /// by one response read. A failed read is non-fatal within the attempt
    /// bound; a buffer-reset failure propagates. Returns whether a response
    /// line was received.
    pub fn connect(&mut self) -> Result<bool, Cl200Error> {
        info!("setting CL-200A to PC connection mode");

        for attempt in 1..=timing::CONNECT_ATTEMPTS {
            self.send_paced(Command::PcConnect, timing::CONNECT_SETTLE)?;

            match self.link.read_line() {
                Ok(_) => {}
                Err(e) => {
                    warn!("PC connection attempt {attempt} failed to read a response: {e}");
                    continue;
                }
            }

            self.link.clear_buffers()?;
            self.state = ConnectionState::PcConnected;
            debug!("PC connection mode confirmed on attempt {attempt}");
            return Ok(true);
        }

        error!("could not connect to the luxmeter");
        Ok(false)
    }

    /// Sets Hold status (command 55). Any transport failure is fatal.
    pub fn hold_mode(&mut self) -> Result<(), Cl200Error> {
        debug!("setting CL-200A to hold status");
        self.link.clear_buffers()?;
        self.send_paced(Command::Hold, timing::HOLD_SETTLE)?;
        self.state = ConnectionState::Held;
        Ok(())
    }

    /// Enters EXT mode (command 40), enabling PC-triggered measurements.
    ///
    /// EXT mode cannot be entered unless Hold status completed; the
    /// instrument signals that with status digit `4`, in which case Hold is
    /// renegotiated and the transmission retried. Status digits `1`..`3`
    /// are unrecoverable without a manual power cycle.
    pub fn ext_mode(&mut self) -> Result<(), Cl200Error> {
        self.link.clear_buffers()?;

        for _ in 0..timing::EXT_MODE_ATTEMPTS {
            self.send_paced(Command::ExtMode, timing::EXT_MODE_SETTLE)?;
            let line = self.link.read_line()?;
            let text = String::from_utf8_lossy(&line);
            let response = DecodedResponse::new(&text);

            match response.status_digit() {
                Some('4') => {
                    // Hold was not completed correctly; repeat it and try again.
                    debug!("EXT mode refused with status 4, repeating hold status");
                    self.hold_mode()?;
                    continue;
                }
                Some(digit @ ('1' | '2' | '3')) => {
                    error!("EXT mode failed with status digit {digit}");
                    info!("switch off the CL-200A and then switch it back on");
                    return Err(Cl200Error::PowerCycleRequired);
                }
                _ => {
                    self.state = ConnectionState::ExtModeReady;
                    info!("CL-200A ready for PC-triggered measurements");
                    return Ok(());
                }
            }
        }

        // Matches the instrument's observed tolerance: after two refused
        // attempts the next measurement exchange renegotiates on its own,
        // so the session proceeds instead of failing here.
        warn!(
            "EXT mode not confirmed after {} attempts, continuing",
            timing::EXT_MODE_ATTEMPTS
        );
        self.state = ConnectionState::ExtModeReady;
        Ok(())
    }
}
