use std::ffi::OsStr;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::FromStr;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use simple_cmd::prelude::OutputExt;
use simple_cmd::CommandBuilder;
use which::which;

use crate::error::Error;
use crate::prelude::CommandBuilderExt;
use crate::types::{Adb, ConnectionType, DeviceEntry, DeviceState};
use crate::utils;

lazy_static! {
	static ref RE_DEVICE_LINE: Regex =
		Regex::new(r"(?m)^(\S+)\s+(device|offline|unauthorized|recovery|sideload)\b").unwrap();
}

impl Adb {
	/// Locate the adb executable on the PATH, falling back to the SDK
	/// platform-tools directory.
	pub fn new() -> crate::result::Result<Adb> {
		match which("adb") {
			Ok(adb) => Ok(Adb(adb)),
			Err(err) => match utils::platform_tools_adb() {
				Ok(adb) => Ok(Adb(adb)),
				Err(_) => Err(Error::WhichError(err)),
			},
		}
	}

	pub fn from(path: &Path) -> crate::result::Result<Adb> {
		if !path.exists() {
			return Err(Error::WhichError(which::Error::CannotFindBinaryPath));
		}
		Ok(Adb(path.to_path_buf()))
	}

	/// Run a bounded adb command against the given address.
	pub fn exec<T>(
		&self,
		addr: &ConnectionType,
		args: Vec<T>,
		timeout: Option<Duration>,
		debug: bool,
	) -> crate::result::Result<Output>
	where
		T: Into<String> + AsRef<OsStr>,
	{
		let builder = CommandBuilder::adb(self).addr(addr).with_debug(debug).args(args).timeout(timeout);
		Ok(builder.build().output()?)
	}

	/// List the devices currently known to the local adb server.
	pub fn devices(&self, timeout: Duration) -> crate::result::Result<Vec<DeviceEntry>> {
		let output = CommandBuilder::adb(self)
			.arg("devices")
			.timeout(Some(timeout))
			.build()
			.output()?;
		let stdout = simple_cmd::Vec8ToString::as_str(&output.stdout).unwrap_or("");
		Ok(parse_devices(stdout))
	}

	/// Disconnect every tcp/ip device. Best effort: a non-zero exit only
	/// yields `false`, transport errors still surface.
	pub fn disconnect_all(&self, timeout: Duration) -> crate::result::Result<bool> {
		let output = CommandBuilder::adb(self)
			.arg("disconnect")
			.timeout(Some(timeout))
			.build()
			.output()?;
		Ok(output.success())
	}

	pub fn start_server(&self, timeout: Duration) -> crate::result::Result<()> {
		CommandBuilder::adb(self)
			.arg("start-server")
			.timeout(Some(timeout))
			.build()
			.output()?;
		Ok(())
	}

	pub fn kill_server(&self, timeout: Duration) -> crate::result::Result<()> {
		CommandBuilder::adb(self)
			.arg("kill-server")
			.timeout(Some(timeout))
			.build()
			.output()?;
		Ok(())
	}

	pub fn as_os_str(&self) -> &OsStr {
		self.as_ref()
	}
}

/// Parse `adb devices` output into entries; the header line and any rows
/// with an unknown state column are skipped.
pub(crate) fn parse_devices(output: &str) -> Vec<DeviceEntry> {
	RE_DEVICE_LINE
		.captures_iter(output)
		.filter_map(|captures| {
			let state = DeviceState::from_str(&captures[2]).ok()?;
			Some(DeviceEntry {
				serial: captures[1].to_string(),
				state,
			})
		})
		.collect()
}

impl std::fmt::Display for Adb {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0.to_str())
	}
}

impl Debug for Adb {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl AsRef<OsStr> for Adb {
	fn as_ref(&self) -> &OsStr {
		self.0.as_ref()
	}
}

impl From<Adb> for PathBuf {
	fn from(value: Adb) -> Self {
		value.0
	}
}
