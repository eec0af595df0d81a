#[cfg(test)]
pub(crate) mod test {
	use std::cell::RefCell;
	use std::collections::HashMap;
	use std::sync::{Arc, Mutex, Once};
	use std::time::Duration;

	use once_cell::sync::Lazy;
	use tracing_appender::non_blocking::WorkerGuard;

	use crate::config::ClientConfig;
	use crate::result::Result;
	use crate::traits::ShellExec;
	use crate::types::{Client, ConnectionType};

	pub(crate) static DEVICE_IP: &'static str = "192.168.1.42:5555";

	pub(crate) static INIT: Once = Once::new();
	pub(crate) static GUARDS: Lazy<Arc<Mutex<Vec<WorkerGuard>>>> = Lazy::new(|| Arc::new(Mutex::new(Vec::new())));

	pub(crate) fn init_log() {
		INIT.call_once(|| {
			use tracing_subscriber::prelude::*;

			let registry = tracing_subscriber::Registry::default();
			let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
			let layer1 = tracing_subscriber::fmt::layer()
				.with_thread_names(false)
				.with_thread_ids(false)
				.with_line_number(false)
				.with_file(false)
				.with_target(false)
				.with_level(false)
				.without_time()
				.with_writer(non_blocking);

			let subscriber = registry.with(layer1);
			tracing::subscriber::set_global_default(subscriber).unwrap();
			GUARDS.lock().unwrap().push(guard);
		})
	}

	/// Production constants minus the settle delays, so protocol tests run
	/// without sleeping through them.
	pub(crate) fn fast_config() -> ClientConfig {
		ClientConfig {
			disconnect_settle: Duration::ZERO,
			verify_delay: Duration::ZERO,
			property_settle_delay: Duration::ZERO,
			daemon_stop_delay: Duration::ZERO,
			daemon_start_delay: Duration::ZERO,
			tcpip_settle_delay: Duration::ZERO,
			..ClientConfig::default()
		}
	}

	#[inline]
	pub(crate) fn connection_from_tcpip() -> ConnectionType {
		ConnectionType::try_from_ip(DEVICE_IP).expect("failed to parse ip address")
	}

	#[inline]
	pub(crate) fn client_from(connection_type: ConnectionType) -> Client {
		Client::try_from(connection_type)
			.expect("Failed to create Client")
			.with_debug(true)
	}

	/// Scripted device transport: responds to known commands, fails every
	/// other one with a transport error, and records the call order.
	#[derive(Default)]
	pub(crate) struct FakeShell {
		responses: HashMap<String, String>,
		calls: RefCell<Vec<String>>,
	}

	impl FakeShell {
		pub(crate) fn with_response(mut self, command: &str, output: &str) -> Self {
			self.responses.insert(command.to_string(), output.to_string());
			self
		}

		pub(crate) fn calls(&self) -> Vec<String> {
			self.calls.borrow().clone()
		}
	}

	impl ShellExec for FakeShell {
		fn shell_output(&self, args: &[&str], _timeout: Duration) -> Result<String> {
			let command = args.join(" ");
			self.calls.borrow_mut().push(command.clone());
			match self.responses.get(&command) {
				Some(output) => Ok(output.clone()),
				None => Err(std::io::Error::new(std::io::ErrorKind::TimedOut, format!("command timed out: {command}")).into()),
			}
		}
	}
}
