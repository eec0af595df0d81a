use std::ffi::OsString;
use std::fmt::{Debug, Display, Formatter};
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;
use std::vec::IntoIter;

use crate::error::Error;
use crate::traits::AsArgs;
use crate::types::ConnectionType;

impl ConnectionType {
	fn values(&self) -> Vec<OsString> {
		match self {
			ConnectionType::TcpIp(sock) => vec![
				"-s".into(),
				sock.to_string().into(),
			],
			ConnectionType::Transport(id) => vec![
				"-t".into(),
				id.to_string().into(),
			],
			ConnectionType::USB => vec!["-d".into()],
		}
	}

	pub fn from_socket_addr<I: Into<SocketAddr>>(socket_addr: I) -> Self {
		ConnectionType::TcpIp(socket_addr.into())
	}

	pub fn try_from_ip(value: &str) -> crate::result::Result<ConnectionType> {
		Ok(ConnectionType::TcpIp(value.parse()?))
	}
}

impl AsArgs<OsString> for ConnectionType {
	fn as_args(&self) -> Vec<OsString> {
		self.values()
	}
}

impl Display for ConnectionType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ConnectionType::TcpIp(sock) => write!(f, "ip:{sock}"),
			ConnectionType::Transport(id) => write!(f, "transport_id:{id}"),
			ConnectionType::USB => write!(f, "usb"),
		}
	}
}

impl Debug for ConnectionType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut debug = f.debug_struct("ConnectionType");
		match self {
			ConnectionType::TcpIp(sock) => debug.field("ip", sock),
			ConnectionType::Transport(id) => debug.field("transport_id", id),
			ConnectionType::USB => debug.field("usb", &""),
		};
		debug.finish()
	}
}

impl From<SocketAddr> for ConnectionType {
	fn from(value: SocketAddr) -> Self {
		ConnectionType::from_socket_addr(value)
	}
}

impl FromStr for ConnectionType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let addr: Result<SocketAddr, AddrParseError> = s.parse();
		match addr {
			Ok(addr) => Ok(ConnectionType::TcpIp(addr)),
			Err(_err) => Err(Error::AddressParseError),
		}
	}
}

impl TryFrom<&str> for ConnectionType {
	type Error = Error;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::from_str(value)
	}
}

impl IntoIterator for ConnectionType {
	type Item = OsString;
	type IntoIter = IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_args().into_iter()
	}
}
