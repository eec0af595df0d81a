use std::thread::sleep;

use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::result::{run_operation, Result, ResultExt};
use crate::traits::ShellExec;
use crate::validate;

/// Switch the device's bridge daemon into network-listening mode.
///
/// The primary path sets the listening property and cycles the daemon, with
/// settle delays between each step. Any primary failure falls back to the
/// single `tcpip` command; the fallback needs no prior-state check because
/// it re-sets the same property and restarts the daemon in one step, which
/// converges from any partially-applied primary state.
pub(crate) fn enable_tcpip<T: ShellExec>(shell: &T, config: &ClientConfig, port: u16) -> Result<()> {
	run_operation("enable tcpip mode", || {
		if !validate::is_valid_adb_port(port, config) {
			return Err(Error::InvalidPortError {
				port,
				min: config.min_adb_port,
				max: config.max_port,
			});
		}

		info!("enabling tcpip mode on port {port}");
		enable_via_property(shell, config, port).or_else(|err| {
			warn!("property path failed ({err}), falling back to tcpip command");
			enable_via_tcpip(shell, config, port)
		})
	})
}

fn enable_via_property<T: ShellExec>(shell: &T, config: &ClientConfig, port: u16) -> Result<()> {
	let port_arg = port.to_string();
	shell
		.shell_output(
			&[
				"setprop",
				"service.adb.tcp.port",
				&port_arg,
			],
			config.command_timeout,
		)
		.on_error(|err| warn!("setprop service.adb.tcp.port failed: {err}"))?;
	sleep(config.property_settle_delay);

	shell
		.shell_output(&["stop", "adbd"], config.command_timeout)
		.on_error(|err| warn!("stop adbd failed: {err}"))?;
	sleep(config.daemon_stop_delay);

	shell
		.shell_output(&["start", "adbd"], config.command_timeout)
		.on_error(|err| warn!("start adbd failed: {err}"))?;
	sleep(config.daemon_start_delay);

	Ok(())
}

fn enable_via_tcpip<T: ShellExec>(shell: &T, config: &ClientConfig, port: u16) -> Result<()> {
	let port_arg = port.to_string();
	shell.shell_output(&["tcpip", &port_arg], config.command_timeout)?;
	sleep(config.tcpip_settle_delay);
	Ok(())
}
