// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod frame;
pub mod response;
pub mod timing;

// --- Re-export key types/functions for easier access ---

// From command.rs
pub use command::{CalibrationBank, Command};

// From error.rs
pub use error::Cl200Error;

// From frame.rs
pub use frame::{checksum, encode, ETX, STX};

// From response.rs
pub use response::{check_measurement, DecodedResponse};

// From timing.rs (constants - users can access via common::timing::*)
