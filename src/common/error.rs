// src/common/error.rs

use std::io;

/// Unified error type for the CL-200A driver.
///
/// Status and battery conditions are distinct variants so callers can decide
/// per kind whether to re-issue a measurement; nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum Cl200Error {
    /// Failure opening or configuring the serial port.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Write or read failure at the serial boundary. Always fatal for the
    /// current call and never retried inside the driver.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An empty response line: the link to the instrument is lost and the
    /// session must be torn down and rebuilt.
    #[error("connection to the luxmeter was lost")]
    ConnectionAborted,

    /// Port discovery found nothing matching.
    #[error("{0}")]
    DeviceNotFound(&'static str),

    /// EXT mode negotiation answered with a fatal status digit; the
    /// instrument has to be power-cycled by hand.
    #[error("switch off the CL-200A and then switch it back on")]
    PowerCycleRequired,

    /// Measurement status digit 1, 2 or 3.
    #[error("instrument reset required: switch off the CL-200A and then switch it back on")]
    ConnectionResetRequired,

    /// Measurement status digit 5: the measurement exceeds the CL-200A
    /// measurement range.
    #[error("measurement value over error: the measurement exceeds the CL-200A measurement range")]
    MeasurementValueOver,

    /// Measurement status digit 6: luminance is low, resulting in reduced
    /// calculation accuracy for determining chromaticity.
    #[error("low luminance error: reduced accuracy for the chromaticity calculation")]
    LowLuminance,

    /// Measurement status digit 7.
    #[error("the Tcp and delta-uv measured values are out of range")]
    OutOfRange,

    /// Battery digit 1. The battery should be changed immediately or the AC
    /// adapter should be used; values from this reading must be discarded.
    #[error("low battery: the values of the most recent measurement must not be used")]
    LowBattery,

    /// The response echoed a different command number than was requested.
    #[error("invalid command number: expected {expected}, got {got:?}")]
    CommandMismatch {
        expected: &'static str,
        got: String,
    },

    /// Response line too short for the fixed offsets, or a numeric field
    /// failed to parse.
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}
