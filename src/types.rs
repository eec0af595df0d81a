use std::net::SocketAddr;
use std::path::PathBuf;

use strum_macros::{Display, EnumString};

use crate::config::ClientConfig;

#[derive(Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Adb(pub(crate) PathBuf);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionType {
	TcpIp(SocketAddr),
	Transport(u8),
	USB,
}

/// Handle to one device. Operations never create or destroy the device,
/// they only issue commands against it.
#[derive(Debug, Clone)]
pub struct Client {
	pub adb: Adb,
	pub addr: ConnectionType,
	pub config: ClientConfig,
	pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct Shell<'a> {
	pub(crate) parent: &'a Client,
}

/// One row of `adb devices` output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceEntry {
	pub serial: String,
	pub state: DeviceState,
}

#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceState {
	Device,
	Offline,
	Unauthorized,
	Recovery,
	Sideload,
}

/// An `(interface, ip)` pair extracted from one line of shell output; lives
/// only within a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressCandidate {
	pub interface: String,
	pub ip: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplaySize {
	pub width: u32,
	pub height: u32,
}

impl DisplaySize {
	pub fn new(width: u32, height: u32) -> Self {
		DisplaySize { width, height }
	}
}

impl AddressCandidate {
	/// Interface priority for candidate selection: wlan wins over
	/// rmnet_data, which wins over eth, which wins over anything else.
	/// Ties resolve by first-seen order (stable min).
	pub fn priority(&self) -> u8 {
		match self.interface.as_str() {
			name if name.starts_with("wlan") => 0,
			name if name.starts_with("rmnet_data") => 1,
			name if name.starts_with("eth") => 2,
			_ => 3,
		}
	}
}
