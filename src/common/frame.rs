//! Wire framing for the CL-200A.
//!
//! A frame is `STX + payload + ETX + BCC + CRLF`. The block check character
//! is the XOR of every byte of `payload + ETX`, rendered as a *decimal*
//! string zero-padded to two characters. That decimal rendering looks wrong
//! next to the usual hex BCC conventions, but it is the behavior the
//! instrument responses actually exercise; do not "fix" it to hex.

use arrayvec::ArrayVec;

/// Start-of-text byte opening every frame.
pub const STX: u8 = 0x02;
/// End-of-text byte closing the payload.
pub const ETX: u8 = 0x03;

/// Longest frame this driver produces: STX + 8-char payload + ETX + 3-digit
/// BCC + CRLF.
pub const MAX_FRAME_LEN: usize = 15;

/// XOR accumulator over every byte of `payload + ETX`.
pub fn checksum(payload: &str) -> u8 {
    let mut acc = 0u8;
    for byte in payload.bytes() {
        acc ^= byte;
    }
    acc ^ ETX
}

/// Wraps `payload` into a complete command frame.
///
/// Pure and total: every payload in the CL-200A command set fits the frame
/// capacity, and the BCC always renders to two (or, for accumulators above
/// 99, three) decimal digits.
pub fn encode(payload: &str) -> ArrayVec<u8, MAX_FRAME_LEN> {
    let mut frame = ArrayVec::new();
    frame.push(STX);
    frame.extend(payload.bytes());
    frame.push(ETX);

    let bcc = checksum(payload);
    if bcc >= 100 {
        frame.push(b'0' + bcc / 100);
    }
    frame.push(b'0' + (bcc / 10) % 10);
    frame.push(b'0' + bcc % 10);

    frame.push(b'\r');
    frame.push(b'\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::command::{CalibrationBank, Command};

    const ALL_COMMANDS: &[Command] = &[
        Command::ReadXyz,
        Command::ReadEvXy,
        Command::ReadEvUv,
        Command::ReadEvTcpDuv,
        Command::ReadEvDwP,
        Command::ExtMode,
        Command::ExtTrigger,
        Command::ReadXyz2,
        Command::ReadCalibration(CalibrationBank::One),
        Command::ReadCalibration(CalibrationBank::Two),
        Command::ReadCalibration(CalibrationBank::Three),
        Command::WriteCalibration(CalibrationBank::One),
        Command::WriteCalibration(CalibrationBank::Two),
        Command::WriteCalibration(CalibrationBank::Three),
        Command::PcConnect,
        Command::PcRelease,
        Command::Hold,
    ];

    #[test]
    fn test_encode_pc_connect() {
        let frame = encode(Command::PcConnect.payload());
        assert_eq!(&frame[..], b"\x0200541   \x0319\r\n");
    }

    #[test]
    fn test_encode_hold() {
        let frame = encode(Command::Hold.payload());
        assert_eq!(&frame[..], b"\x0299551  0\x0302\r\n");
    }

    #[test]
    fn test_checksum_is_zero_padded_decimal() {
        // "004711" + ETX XORs to zero, the strongest padding case.
        assert_eq!(checksum("004711"), 0);
        let frame = encode("004711");
        assert_eq!(&frame[..], b"\x02004711\x0300\r\n");

        // A double-digit accumulator renders without padding.
        assert_eq!(checksum("004811  "), 15);
        let frame = encode("004811  ");
        assert_eq!(&frame[..], b"\x02004811  \x0315\r\n");
    }

    #[test]
    fn test_frame_shape_and_embedded_checksum() {
        for cmd in ALL_COMMANDS {
            let payload = cmd.payload();
            let frame = encode(payload);

            assert_eq!(frame[0], STX, "frame start for {:?}", cmd);
            assert_eq!(&frame[frame.len() - 2..], b"\r\n", "terminator for {:?}", cmd);
            assert_eq!(frame[1 + payload.len()], ETX, "ETX position for {:?}", cmd);

            // The digits preceding CRLF must recompute from the payload.
            let embedded = &frame[2 + payload.len()..frame.len() - 2];
            let expected = format!("{:02}", checksum(payload));
            assert_eq!(embedded, expected.as_bytes(), "BCC for {:?}", cmd);
        }
    }
}
