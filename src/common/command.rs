//! CL-200A command definitions.
//!
//! See the CL-200A communication specification, "Command" table. Every
//! command is a fixed-width ASCII payload; spaces are significant and part
//! of the template.

use core::fmt;

/// User-calibration coefficient bank (commands 47/48 address one of three).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CalibrationBank {
    One,
    Two,
    Three,
}

/// Represents a CL-200A command.
///
/// The `Display` implementation yields the raw payload template, i.e. the
/// bytes that go between STX and ETX on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read measurement data as X, Y, Z (command 01).
    ReadXyz,

    /// Read measurement data as Ev, x, y (command 02).
    ReadEvXy,

    /// Read measurement data as Ev, u', v' (command 03).
    ReadEvUv,

    /// Read measurement data as Ev, Tcp, Δuv (command 08).
    ReadEvTcpDuv,

    /// Read measurement data as Ev, DW, P (command 15).
    ReadEvDwP,

    /// Set EXT mode (command 40). Enables PC-triggered measurement capture.
    ExtMode,

    /// Take a measurement in EXT mode (command 40, trigger variant "40r").
    ExtTrigger,

    /// Read measurement data as X2, Y, Z (command 45).
    ReadXyz2,

    /// Read user-calibration coefficients (command 47). Template only; the
    /// coefficient exchange itself is not implemented by this driver.
    ReadCalibration(CalibrationBank),

    /// Write user-calibration coefficients (command 48). Template only.
    WriteCalibration(CalibrationBank),

    /// Set PC connection mode (command 54). Must be issued before any other
    /// command is accepted.
    PcConnect,

    /// Release PC connection mode (command 54, release variant "54r").
    PcRelease,

    /// Set Hold status (command 55). EXT mode cannot be entered unless the
    /// instrument is holding.
    Hold,
}

impl Command {
    /// The fixed payload template sent between STX and ETX.
    pub fn payload(&self) -> &'static str {
        match self {
            Command::ReadXyz => "00011200",
            Command::ReadEvXy => "00021200",
            Command::ReadEvUv => "00031200",
            Command::ReadEvTcpDuv => "00081200",
            Command::ReadEvDwP => "00151200",
            Command::ExtMode => "004010  ",
            Command::ExtTrigger => "994021  ",
            Command::ReadXyz2 => "00451000",
            Command::ReadCalibration(bank) => match bank {
                CalibrationBank::One => "004711",
                CalibrationBank::Two => "004721",
                CalibrationBank::Three => "004731",
            },
            Command::WriteCalibration(bank) => match bank {
                CalibrationBank::One => "004811  ",
                CalibrationBank::Two => "004821  ",
                CalibrationBank::Three => "004831  ",
            },
            Command::PcConnect => "00541   ",
            Command::PcRelease => "0054    ",
            Command::Hold => "99551  0",
        }
    }

    /// The two-digit command number the instrument echoes back at offsets
    /// 3..5 of its response line.
    pub fn number(&self) -> &'static str {
        match self {
            Command::ReadXyz => "01",
            Command::ReadEvXy => "02",
            Command::ReadEvUv => "03",
            Command::ReadEvTcpDuv => "08",
            Command::ReadEvDwP => "15",
            Command::ExtMode | Command::ExtTrigger => "40",
            Command::ReadXyz2 => "45",
            Command::ReadCalibration(_) => "47",
            Command::WriteCalibration(_) => "48",
            Command::PcConnect | Command::PcRelease => "54",
            Command::Hold => "55",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}
