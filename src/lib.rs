// src/lib.rs

//! Driver for the Konica Minolta CL-200A chroma meter.
//!
//! The CL-200A speaks a fixed-framing ASCII protocol over a point-to-point
//! serial link (9600 baud, 7E1). Before any measurement can be taken the
//! instrument must be walked through PC-connection mode, Hold status and
//! EXT mode; [`luxmeter::Cl200a`] owns that state machine and exposes the
//! four typed measurement queries.
//!
//! Vendor documentation:
//! <http://www.konicaminolta.com.cn/instruments/download/software/pdf/CL-200A_communication_specifications.pdf>

pub mod common;
pub mod discovery;
pub mod luxmeter;
pub mod transport;

// Re-export key types for convenience
pub use common::{Cl200Error, Command};
pub use luxmeter::Cl200a;
pub use transport::{PortSession, SerialLink};
