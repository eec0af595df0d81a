use std::fmt::{Display, Formatter};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::thread::sleep;
use std::time::{Duration, Instant};

use simple_cmd::prelude::OutputExt;
use simple_cmd::CommandBuilder;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::prelude::CommandBuilderExt;
use crate::result::{run_operation, Result, ResultExt};
use crate::tcpip;
use crate::types::{Adb, Client, ConnectionType, DeviceState, DisplaySize, Shell};

static GET_STATE_TIMEOUT: u64 = 200u64;

static REJECT_PHRASES: &[&str] = &[
	"failed",
	"cannot connect",
	"Connection refused",
];

impl Client {
	pub fn new(adb: Adb, addr: ConnectionType, config: ClientConfig, debug: bool) -> Self {
		Client { adb, addr, config, debug }
	}

	/// return the client shell interface
	pub fn shell(&self) -> Shell {
		Shell { parent: self }
	}

	/// Add debug tracing to the executed commands
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	/// Resolve the device's usable network address.
	pub fn ip_address(&self) -> Result<String> {
		self.shell().ip_address()
	}

	pub fn size(&self) -> Result<DisplaySize> {
		self.shell().size()
	}

	pub fn set_size(&self, size: DisplaySize) -> Result<()> {
		self.shell().set_size(size)
	}

	pub fn reset_size(&self) -> Result<()> {
		self.shell().reset_size()
	}

	pub fn density(&self) -> Result<u16> {
		self.shell().density()
	}

	pub fn set_density(&self, density: u16) -> Result<()> {
		self.shell().set_density(density)
	}

	pub fn reset_density(&self) -> Result<()> {
		self.shell().reset_density()
	}

	/// Switch the device's bridge daemon to listen on the given tcp port.
	/// Fails fast on an out-of-range port, before any device interaction.
	pub fn tcpip(&self, port: u16) -> Result<()> {
		tcpip::enable_tcpip(&self.shell(), &self.config, port)
	}

	/// Checks whether the device currently answers on this address.
	pub fn is_connected(&self) -> bool {
		let mut command = CommandBuilder::from(self);
		command = command
			.arg("get-state")
			.timeout(Some(Duration::from_millis(GET_STATE_TIMEOUT)));
		let output = command.build().output();
		if let Ok(output) = output {
			output.success()
		} else {
			false
		}
	}

	/// Establish a network connection to this client's `ip:port` address and
	/// verify it against the devices list.
	///
	/// `Ok(false)` is a well-formed negative outcome (attempt timed out, the
	/// bridge refused, or verification did not find the endpoint), not an
	/// error; `Err` means the protocol itself could not run.
	pub fn connect(&self) -> Result<bool> {
		run_operation("connect to wifi device", || {
			let target = match self.addr {
				ConnectionType::TcpIp(sock) => sock.to_string(),
				_ => return Err(Error::InvalidConnectionTypeError),
			};

			info!("connecting to {target}");

			if self.is_listed(&target)? {
				info!("device {target} already connected");
				return Ok(true);
			}

			// clear stale connection state before the attempt
			let _ = self
				.adb
				.disconnect_all(self.config.disconnect_timeout)
				.on_error(|err| warn!("disconnect before connect failed: {err}"));
			sleep(self.config.disconnect_settle);

			let mut command = Command::new(self.adb.as_os_str());
			command.arg("connect").arg(&target);

			let output = match run_bounded(command, self.config.connection_timeout)? {
				Some(output) => output,
				None => {
					warn!("connection to {target} timed out");
					return Ok(false);
				}
			};

			debug!("connect output: {:?}", output.text.trim());
			let claimed = output.exit_code == Some(0) && classify_connect_output(&output.text, &target);
			if !claimed {
				info!("connection to {target} failed");
				return Ok(false);
			}

			// the bridge sometimes claims a connection it cannot back up;
			// the devices list is the authority
			sleep(self.config.verify_delay);
			let verified = self.is_listed(&target)?;
			debug!("connection verified: {verified}");
			Ok(verified)
		})
	}

	/// Disconnect this client's address. Any non-tcp/ip address disconnects
	/// all network devices.
	pub fn disconnect(&self) -> Result<bool> {
		let mut command = CommandBuilder::adb(&self.adb).with_debug(self.debug);
		command = command.arg("disconnect");
		command = match self.addr {
			ConnectionType::TcpIp(ip) => command.arg(ip.to_string()),
			_ => command,
		};

		match command.timeout(Some(self.config.disconnect_timeout)).build().output() {
			Ok(output) => Ok(output.success()),
			Err(err) => Err(Error::CommandError(err)),
		}
	}

	fn is_listed(&self, target: &str) -> Result<bool> {
		let entries = self.adb.devices(self.config.command_timeout)?;
		Ok(entries
			.iter()
			.any(|entry| entry.serial == target && entry.state == DeviceState::Device))
	}
}

pub(crate) struct BoundedOutput {
	pub text: String,
	pub exit_code: Option<i32>,
}

/// Run a host command with piped output and a hard deadline; the child is
/// killed when the deadline passes and `None` is returned. Output pipes are
/// drained on separate threads so a chatty child cannot block on a full
/// pipe buffer and fake a timeout.
pub(crate) fn run_bounded(mut command: Command, timeout: Duration) -> Result<Option<BoundedOutput>> {
	let mut child = command.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

	let mut stdout = child
		.stdout
		.take()
		.ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
	let mut stderr = child
		.stderr
		.take()
		.ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

	let stdout_handle = thread::spawn(move || {
		let mut buffer = Vec::new();
		let _ = stdout.read_to_end(&mut buffer);
		buffer
	});
	let stderr_handle = thread::spawn(move || {
		let mut buffer = Vec::new();
		let _ = stderr.read_to_end(&mut buffer);
		buffer
	});

	let start = Instant::now();
	let status = loop {
		match child.try_wait()? {
			Some(status) => break status,
			None => {
				if start.elapsed() > timeout {
					let _ = child.kill();
					let _ = child.wait();
					let _ = stdout_handle.join();
					let _ = stderr_handle.join();
					return Ok(None);
				}
				sleep(Duration::from_millis(50));
			}
		}
	};

	let stdout_bytes = stdout_handle.join().unwrap_or_default();
	let stderr_bytes = stderr_handle.join().unwrap_or_default();
	let mut text = String::from_utf8_lossy(&stdout_bytes).into_owned();
	text.push_str(&String::from_utf8_lossy(&stderr_bytes));

	Ok(Some(BoundedOutput {
		text,
		exit_code: status.code(),
	}))
}

/// The rejection check runs first: output carrying both a success and a
/// rejection phrasing is a failure.
pub(crate) fn classify_connect_output(output: &str, target: &str) -> bool {
	if REJECT_PHRASES.iter().any(|phrase| output.contains(phrase)) {
		return false;
	}
	output.contains(&format!("connected to {target}"))
}

impl TryFrom<ConnectionType> for Client {
	type Error = crate::error::Error;

	fn try_from(value: ConnectionType) -> std::result::Result<Self, Self::Error> {
		let adb = Adb::new()?;
		Ok(Client::new(adb, value, ClientConfig::default(), false))
	}
}

impl Display for Client {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.addr.fmt(f)
	}
}
