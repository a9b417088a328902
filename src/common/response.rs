//! Fixed-offset decoding of CL-200A response lines.
//!
//! A response line mirrors the command framing: STX at index 0, then the
//! ASCII body, ETX, BCC and CRLF. All offsets below are indexed from the
//! start of the line *including* the STX byte:
//!
//! ```text
//! [3..5]  command number echo
//! [6]     status digit
//! [8]     battery digit
//! [9], [15], [21]  numeric channel fields, 6 characters each:
//!                  sign + 4-digit mantissa + exponent digit
//! ```
//!
//! A channel field decodes as `sign * mantissa * 10^(exponent - 4)`, rounded
//! to 3 decimal places. The mantissa may carry leading spaces (`" 273"` is
//! 273.0). Offsets are accessed leniently: a short line yields "no digit"
//! rather than an index panic, matching the instrument's behavior of
//! answering mode commands with lines too short to carry channels.

use super::command::Command;
use super::error::Cl200Error;

const COMMAND_NUMBER_START: usize = 3;
const COMMAND_NUMBER_END: usize = 5;
const STATUS_OFFSET: usize = 6;
const BATTERY_OFFSET: usize = 8;
const CHANNEL_OFFSETS: [usize; 3] = [9, 15, 21];
const FIELD_LEN: usize = 6;
const MANTISSA_DIGITS: usize = 4;

/// A received response line with fixed-offset field accessors.
///
/// Holds a borrowed view; decoding happens per accessor call. The BCC of a
/// received line is not verified, only recomputable by callers that want to.
#[derive(Debug, Copy, Clone)]
pub struct DecodedResponse<'a> {
    line: &'a str,
}

impl<'a> DecodedResponse<'a> {
    pub fn new(line: &'a str) -> Self {
        DecodedResponse { line }
    }

    /// The raw line, terminator included.
    pub fn raw(&self) -> &'a str {
        self.line
    }

    /// Two-character command number echo, if the line is long enough.
    pub fn command_number(&self) -> Option<&'a str> {
        self.line.get(COMMAND_NUMBER_START..COMMAND_NUMBER_END)
    }

    /// Status digit at offset 6.
    pub fn status_digit(&self) -> Option<char> {
        self.line.chars().nth(STATUS_OFFSET)
    }

    /// Battery digit at offset 8.
    pub fn battery_digit(&self) -> Option<char> {
        self.line.chars().nth(BATTERY_OFFSET)
    }

    /// Fails unless the echoed command number matches the one requested.
    pub fn expect_command(&self, command: Command) -> Result<(), Cl200Error> {
        let got = self.command_number().unwrap_or("");
        if got == command.number() {
            Ok(())
        } else {
            Err(Cl200Error::CommandMismatch {
                expected: command.number(),
                got: got.to_owned(),
            })
        }
    }

    /// Decodes the channel field starting at `offset`.
    pub fn channel_at(&self, offset: usize) -> Result<f64, Cl200Error> {
        decode_field(self.line, offset)
    }

    /// Decodes all three channel fields at their fixed offsets.
    pub fn channels(&self) -> Result<(f64, f64, f64), Cl200Error> {
        let first = self.channel_at(CHANNEL_OFFSETS[0])?;
        let second = self.channel_at(CHANNEL_OFFSETS[1])?;
        let third = self.channel_at(CHANNEL_OFFSETS[2])?;
        Ok((first, second, third))
    }
}

/// Decodes one `sign + mantissa + exponent` field at `start`.
///
/// All slicing goes through `get`: a line that came off a noisy link via
/// lossy UTF-8 decoding can put multi-byte replacement chars inside a field,
/// and those must decode as malformed, not split a char boundary.
pub(crate) fn decode_field(line: &str, start: usize) -> Result<f64, Cl200Error> {
    let field = line
        .get(start..start + FIELD_LEN)
        .ok_or(Cl200Error::MalformedResponse("line too short for channel field"))?;

    let sign = if field.starts_with('+') { 1.0 } else { -1.0 };

    let mantissa: f64 = field
        .get(1..1 + MANTISSA_DIGITS)
        .ok_or(Cl200Error::MalformedResponse("non-numeric mantissa"))?
        .trim()
        .parse()
        .map_err(|_| Cl200Error::MalformedResponse("non-numeric mantissa"))?;

    let exponent = field
        .get(1 + MANTISSA_DIGITS..)
        .and_then(|s| s.chars().next())
        .and_then(|c| c.to_digit(10))
        .ok_or(Cl200Error::MalformedResponse("non-numeric exponent"))? as i32
        - 4;

    let value = sign * mantissa * 10f64.powi(exponent);
    Ok(round3(value))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Classifies the status and battery digits of a measurement response.
///
/// Pure mapping, no retries: every instrument-side condition surfaces as a
/// distinct error kind and the caller decides whether to measure again.
pub fn check_measurement(response: &DecodedResponse<'_>) -> Result<(), Cl200Error> {
    match response.status_digit() {
        Some('1' | '2' | '3') => return Err(Cl200Error::ConnectionResetRequired),
        Some('5') => return Err(Cl200Error::MeasurementValueOver),
        Some('6') => return Err(Cl200Error::LowLuminance),
        Some('7') => return Err(Cl200Error::OutOfRange),
        _ => {}
    }

    if response.battery_digit() == Some('1') {
        return Err(Cl200Error::LowBattery);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ev/x/y response used throughout: command 02, clean status, channels
    // 27.3 lux, x = 0.455, y = 0.450.
    const EV_X_Y_LINE: &str = "\x0200021 10+ 2733+45450+44990\x031F\r\n";

    #[test]
    fn test_decode_field_positive() {
        assert_eq!(decode_field("+ 2733", 0).unwrap(), 27.3);
    }

    #[test]
    fn test_decode_field_negative() {
        assert_eq!(decode_field("- 2733", 0).unwrap(), -27.3);
    }

    #[test]
    fn test_decode_field_full_mantissa() {
        assert_eq!(decode_field("+45450", 0).unwrap(), 0.455);
        assert_eq!(decode_field("+44990", 0).unwrap(), 0.45);
    }

    #[test]
    fn test_decode_field_too_short() {
        assert!(matches!(
            decode_field("+ 27", 0),
            Err(Cl200Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_channels_survive_noise_bytes() {
        // Garbage bytes inside a channel field become multi-byte replacement
        // chars after lossy decoding; they must fail cleanly, not panic on a
        // char boundary.
        let mut raw = b"\x0200021 10".to_vec();
        raw.extend_from_slice(&[0xFF, 0xFE]);
        raw.extend_from_slice(b"+45450+44990\x031F\r\n");

        let text = String::from_utf8_lossy(&raw).into_owned();
        let response = DecodedResponse::new(&text);
        assert!(matches!(
            response.channels(),
            Err(Cl200Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_field_bad_mantissa() {
        assert!(matches!(
            decode_field("+abcd0", 0),
            Err(Cl200Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_channels_from_example_line() {
        let response = DecodedResponse::new(EV_X_Y_LINE);
        let (ev, x, y) = response.channels().unwrap();
        assert_eq!(ev, 27.3);
        assert_eq!(x, 0.455);
        assert_eq!(y, 0.45);
    }

    #[test]
    fn test_command_number_echo() {
        let response = DecodedResponse::new(EV_X_Y_LINE);
        assert_eq!(response.command_number(), Some("02"));
        assert!(response.expect_command(Command::ReadEvXy).is_ok());
        assert!(matches!(
            response.expect_command(Command::ReadXyz),
            Err(Cl200Error::CommandMismatch { expected: "01", .. })
        ));
    }

    #[test]
    fn test_short_line_has_no_digits() {
        let response = DecodedResponse::new("\x02004");
        assert_eq!(response.status_digit(), None);
        assert_eq!(response.battery_digit(), None);
        assert!(check_measurement(&response).is_ok());
    }

    fn line_with_status(status: char) -> String {
        format!("\x0200021{status}10+ 2733+45450+44990\x031F\r\n")
    }

    #[test]
    fn test_check_measurement_status_digits() {
        for digit in ['1', '2', '3'] {
            let line = line_with_status(digit);
            let response = DecodedResponse::new(&line);
            assert!(matches!(
                check_measurement(&response),
                Err(Cl200Error::ConnectionResetRequired)
            ));
        }

        let line = line_with_status('5');
        assert!(matches!(
            check_measurement(&DecodedResponse::new(&line)),
            Err(Cl200Error::MeasurementValueOver)
        ));

        let line = line_with_status('6');
        assert!(matches!(
            check_measurement(&DecodedResponse::new(&line)),
            Err(Cl200Error::LowLuminance)
        ));

        let line = line_with_status('7');
        assert!(matches!(
            check_measurement(&DecodedResponse::new(&line)),
            Err(Cl200Error::OutOfRange)
        ));
    }

    #[test]
    fn test_check_measurement_low_battery() {
        // Status clean, battery digit at offset 8 set to 1.
        let line = "\x0200021 11+ 2733+45450+44990\x031F\r\n";
        let response = DecodedResponse::new(line);
        assert!(matches!(
            check_measurement(&response),
            Err(Cl200Error::LowBattery)
        ));
    }

    #[test]
    fn test_check_measurement_clean() {
        let response = DecodedResponse::new(EV_X_Y_LINE);
        assert!(check_measurement(&response).is_ok());
    }
}
