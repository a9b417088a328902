//! Serial-port discovery for attached luxmeters.
//!
//! The CL-200A ships with an FTDI USB-serial bridge, so candidates are
//! picked by matching the USB manufacturer string. Discovery only yields
//! port names; opening them is [`crate::transport::PortSession`]'s job.

use serialport::{SerialPortInfo, SerialPortType};

use crate::common::error::Cl200Error;

/// Manufacturer keyword of the stock CL-200A serial bridge.
pub const DEFAULT_MANUFACTURER: &str = "FTDI";

/// Lists every serial port on the system.
pub fn list_ports() -> Result<Vec<SerialPortInfo>, Cl200Error> {
    let ports = serialport::available_ports()?;
    if ports.is_empty() {
        return Err(Cl200Error::DeviceNotFound("no serial port found"));
    }
    Ok(ports)
}

/// Port names whose USB manufacturer string contains `keyword`.
pub fn find_luxmeters(keyword: &str) -> Result<Vec<String>, Cl200Error> {
    let ports = list_ports()?;
    let found = filter_by_manufacturer(&ports, keyword);
    if found.is_empty() {
        return Err(Cl200Error::DeviceNotFound("luxmeter not found"));
    }
    Ok(found)
}

fn filter_by_manufacturer(ports: &[SerialPortInfo], keyword: &str) -> Vec<String> {
    ports
        .iter()
        .filter_map(|port| match &port.port_type {
            SerialPortType::UsbPort(usb) => usb
                .manufacturer
                .as_deref()
                .filter(|manufacturer| manufacturer.contains(keyword))
                .map(|_| port.port_name.clone()),
            _ => None,
        })
        .collect()
}
