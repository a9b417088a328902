// src/common/timing.rs

use std::time::Duration;

// Pacing delays are dictated by the instrument and are part of protocol
// correctness, not tuning. None of them may be skipped.

/// Serial line speed required by the CL-200A.
pub const BAUD_RATE: u32 = 9600;

/// Hard timeout on a blocking read; an empty line after this long means the
/// link is gone.
pub const READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Settling delay after transmitting the PC-connection command (54).
pub const CONNECT_SETTLE: Duration = Duration::from_millis(500);

/// Settling delay after transmitting the hold command (55).
pub const HOLD_SETTLE: Duration = Duration::from_millis(500);

/// Settling delay after transmitting the EXT mode command (40).
pub const EXT_MODE_SETTLE: Duration = Duration::from_millis(125);

/// Settling delay after the measurement trigger (40r), before the read
/// command may follow.
pub const TRIGGER_SETTLE: Duration = Duration::from_millis(500);

/// Attempt bound on the PC-connection handshake.
pub const CONNECT_ATTEMPTS: usize = 2;

/// Attempt bound on EXT mode negotiation.
pub const EXT_MODE_ATTEMPTS: usize = 2;
