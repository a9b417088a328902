//! Measurement trigger/read exchanges and the typed measurement queries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::common::command::Command;
use crate::common::error::Cl200Error;
use crate::common::response::{self, DecodedResponse};
use crate::common::timing;
use crate::transport::SerialLink;

use super::Cl200a;

/// Ev, x, y reading (command 02): illuminance in lux plus CIE 1931
/// chromaticity coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IlluminanceChromaticity {
    pub ev: f64,
    pub x: f64,
    pub y: f64,
    pub taken_at: DateTime<Utc>,
}

/// X, Y, Z tristimulus reading (command 01).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tristimulus {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub taken_at: DateTime<Utc>,
}

/// Ev, u', v' reading (command 03): illuminance plus CIE 1976 chromaticity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IlluminanceUv {
    pub ev: f64,
    pub u_prime: f64,
    pub v_prime: f64,
    pub taken_at: DateTime<Utc>,
}

/// Ev, Tcp, Δuv reading (command 08): illuminance, correlated color
/// temperature and its deviation from the blackbody locus.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorTemperature {
    pub ev: f64,
    pub tcp: f64,
    pub delta_uv: f64,
    pub taken_at: DateTime<Utc>,
}

impl<L: SerialLink> Cl200a<L> {
    /// Triggers a capture in EXT mode and reads it back with `read_cmd`.
    ///
    /// The timestamp is taken right after the read command is written, so it
    /// approximates time-of-send, not the instrument's capture time; callers
    /// must not treat it as exact.
    fn perform_measurement(
        &mut self,
        read_cmd: Command,
    ) -> Result<(String, DateTime<Utc>), Cl200Error> {
        self.link.clear_buffers()?;

        self.send_paced(Command::ExtTrigger, timing::TRIGGER_SETTLE)?;
        self.send_paced(read_cmd, Duration::ZERO)?;
        let taken_at = Utc::now();

        let line = self.link.read_line()?;
        if line.is_empty() {
            error!("no data received from the CL-200A");
            return Err(Cl200Error::ConnectionAborted);
        }

        let text = String::from_utf8_lossy(&line).into_owned();
        response::check_measurement(&DecodedResponse::new(&text))?;
        debug!("got raw data: {}", text.trim_end());

        Ok((text, taken_at))
    }

    fn read_channels(
        &mut self,
        read_cmd: Command,
    ) -> Result<(f64, f64, f64, DateTime<Utc>), Cl200Error> {
        let (text, taken_at) = self.perform_measurement(read_cmd)?;
        let response = DecodedResponse::new(&text);
        response.expect_command(read_cmd)?;
        let (first, second, third) = response.channels()?;
        Ok((first, second, third, taken_at))
    }

    /// Reads the most recent measurement as Ev, x, y (command 02).
    pub fn read_illuminance_chromaticity(
        &mut self,
    ) -> Result<IlluminanceChromaticity, Cl200Error> {
        let (ev, x, y, taken_at) = self.read_channels(Command::ReadEvXy)?;
        debug!("returning {ev} lux, x: {x}, y: {y}");
        Ok(IlluminanceChromaticity { ev, x, y, taken_at })
    }

    /// Reads the most recent measurement as X, Y, Z (command 01).
    pub fn read_tristimulus(&mut self) -> Result<Tristimulus, Cl200Error> {
        let (x, y, z, taken_at) = self.read_channels(Command::ReadXyz)?;
        debug!("X: {x}, Y: {y}, Z: {z}");
        Ok(Tristimulus { x, y, z, taken_at })
    }

    /// Reads the most recent measurement as Ev, u', v' (command 03).
    pub fn read_illuminance_uv(&mut self) -> Result<IlluminanceUv, Cl200Error> {
        let (ev, u_prime, v_prime, taken_at) = self.read_channels(Command::ReadEvUv)?;
        debug!("illuminance: {ev} lux, u': {u_prime}, v': {v_prime}");
        Ok(IlluminanceUv {
            ev,
            u_prime,
            v_prime,
            taken_at,
        })
    }

    /// Reads the most recent measurement as Ev, Tcp, Δuv (command 08).
    pub fn read_color_temperature(&mut self) -> Result<ColorTemperature, Cl200Error> {
        let (ev, tcp, delta_uv, taken_at) = self.read_channels(Command::ReadEvTcpDuv)?;
        debug!("illuminance: {ev} lux, Tcp: {tcp}, Δuv: {delta_uv}");
        Ok(ColorTemperature {
            ev,
            tcp,
            delta_uv,
            taken_at,
        })
    }
}
