use regex::Regex;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::result::{run_operation, Result, ResultExt};
use crate::traits::ShellExec;
use crate::types::AddressCandidate;
use crate::validate;

/// Resolve the device's usable IPv4 address. Strategies run in a fixed
/// order, each one only after every previous one failed; the first success
/// wins. Every strategy failure is logged before falling through, and the
/// last strategy's failure is what surfaces when all four exhaust.
pub(crate) fn resolve_ip_address<T: ShellExec>(shell: &T, config: &ClientConfig) -> Result<String> {
	run_operation("resolve ip address", || {
		route_table(shell, config)
			.on_error(|err| warn!("route table strategy failed: {err}"))
			.or_else(|_| interfaces(shell, config).on_error(|err| warn!("interface strategy failed: {err}")))
			.or_else(|_| netcfg(shell, config).on_error(|err| warn!("netcfg strategy failed: {err}")))
			.or_else(|_| ifconfig(shell, config).on_error(|err| warn!("ifconfig strategy failed: {err}")))
	})
}

/// `ip route` lists one line per route; lines carrying both a `dev` and a
/// `src` column yield candidates, and the best interface wins.
fn route_table<T: ShellExec>(shell: &T, config: &ClientConfig) -> Result<String> {
	let output = shell.shell_output(&["ip", "route"], config.command_timeout)?;
	if output.trim().is_empty() {
		return Err(Error::parse("empty ip route output", output));
	}

	let candidates = route_candidates(&output, &config.route_pattern);
	match select_candidate(&candidates) {
		Some(candidate) => {
			debug!("address found via ip route: {} on {}", candidate.ip, candidate.interface);
			Ok(candidate.ip.clone())
		}
		None => Err(Error::parse("no usable address in ip route output", output)),
	}
}

/// Extract every usable `(interface, ip)` pair, in output order.
pub(crate) fn route_candidates(output: &str, pattern: &Regex) -> Vec<AddressCandidate> {
	output
		.lines()
		.filter_map(|line| {
			let captures = pattern.captures(line)?;
			let candidate = AddressCandidate {
				interface: captures[1].to_string(),
				ip: captures[2].to_string(),
			};
			validate::is_usable_ip_address(&candidate.ip).then_some(candidate)
		})
		.collect()
}

/// Lowest priority wins; on equal priority the first-seen candidate is kept.
pub(crate) fn select_candidate(candidates: &[AddressCandidate]) -> Option<&AddressCandidate> {
	let mut selected: Option<&AddressCandidate> = None;
	for candidate in candidates {
		if selected.map_or(true, |best| candidate.priority() < best.priority()) {
			selected = Some(candidate);
		}
	}
	selected
}

/// Probe each configured Wi-Fi interface in order and return the first
/// usable address.
fn interfaces<T: ShellExec>(shell: &T, config: &ClientConfig) -> Result<String> {
	for name in &config.wifi_interfaces {
		let result = interface_address(shell, config, name)
			.on_error(|err| debug!("interface {name} probe failed: {err}"));
		if result.is_ok() {
			return result;
		}
	}
	Err(Error::NoUsableAddressError(format!(
		"no address on interfaces {:?}",
		config.wifi_interfaces
	)))
}

fn interface_address<T: ShellExec>(shell: &T, config: &ClientConfig, name: &str) -> Result<String> {
	let output = shell.shell_output(
		&[
			"ip", "-f", "inet", "addr", "show", name,
		],
		config.command_timeout,
	)?;
	if output.trim().is_empty() || output.contains("does not exist") {
		return Err(Error::parse(format!("interface {name} does not exist or has no output"), output));
	}

	let captures = config
		.inet_pattern
		.captures(&output)
		.ok_or_else(|| Error::parse(format!("no inet address on interface {name}"), output.clone()))?;
	let ip = captures[1].to_string();
	if validate::is_usable_ip_address(&ip) {
		debug!("address found on interface {name}: {ip}");
		Ok(ip)
	} else {
		Err(Error::NoUsableAddressError(ip))
	}
}

/// Legacy fallback for old devices that still ship `netcfg`.
fn netcfg<T: ShellExec>(shell: &T, config: &ClientConfig) -> Result<String> {
	let output = shell.shell_output(&["netcfg"], config.command_timeout)?;
	if output.trim().is_empty() {
		return Err(Error::parse("empty netcfg output", output));
	}

	let captures = config
		.netcfg_pattern
		.captures(&output)
		.ok_or_else(|| Error::parse("no address in netcfg output", output.clone()))?;
	let ip = captures[1].to_string();
	if validate::is_usable_ip_address(&ip) {
		debug!("address found via netcfg: {ip}");
		Ok(ip)
	} else {
		Err(Error::NoUsableAddressError(ip))
	}
}

/// Last resort: `ifconfig wlan0`, present on some vendor builds where the
/// `ip` tool is missing.
fn ifconfig<T: ShellExec>(shell: &T, config: &ClientConfig) -> Result<String> {
	let output = shell.shell_output(&["ifconfig", "wlan0"], config.command_timeout)?;
	if output.trim().is_empty() || output.contains("not found") {
		return Err(Error::parse("ifconfig wlan0 not found or has no output", output));
	}

	let captures = config
		.ifconfig_pattern
		.captures(&output)
		.ok_or_else(|| Error::parse("no address in ifconfig output", output.clone()))?;
	let ip = captures[1].to_string();
	if validate::is_usable_ip_address(&ip) {
		debug!("address found via ifconfig: {ip}");
		Ok(ip)
	} else {
		Err(Error::NoUsableAddressError(ip))
	}
}

#[cfg(test)]
mod test {
	use crate::config::ClientConfig;
	use crate::net::{resolve_ip_address, route_candidates, select_candidate};
	use crate::test::test::{init_log, FakeShell};
	use crate::types::AddressCandidate;

	#[test]
	fn test_route_table_strategy() {
		init_log();
		let shell = FakeShell::default()
			.with_response("ip route", "192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.20");
		let config = ClientConfig::default();

		let ip = resolve_ip_address(&shell, &config).expect("expected address");
		assert_eq!("192.168.1.20", ip);
		assert_eq!(vec!["ip route".to_string()], shell.calls());
	}

	#[test]
	fn test_route_table_prefers_wlan() {
		init_log();
		let output = "10.32.0.0/16 dev rmnet_data0 proto kernel scope link src 10.32.14.2\n\
			192.168.1.0/24 dev eth0 proto kernel scope link src 192.168.1.7\n\
			192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.20";
		let shell = FakeShell::default().with_response("ip route", output);
		let config = ClientConfig::default();

		let ip = resolve_ip_address(&shell, &config).expect("expected address");
		assert_eq!("192.168.1.20", ip);
	}

	#[test]
	fn test_route_table_tie_keeps_first_seen() {
		let config = ClientConfig::default();
		let output = "192.168.1.0/24 dev wlan1 proto kernel scope link src 192.168.1.30\n\
			192.168.2.0/24 dev wlan0 proto kernel scope link src 192.168.2.40";
		let candidates = route_candidates(output, &config.route_pattern);
		assert_eq!(2, candidates.len());

		let selected = select_candidate(&candidates).expect("expected candidate");
		assert_eq!("wlan1", selected.interface);
		assert_eq!("192.168.1.30", selected.ip);
	}

	#[test]
	fn test_route_table_rejects_unusable_candidates() {
		let config = ClientConfig::default();
		let output = "0.0.0.0/0 dev wlan0 proto kernel scope link src 0.0.0.0\n\
			169.254.0.0/16 dev wlan0 proto kernel scope link src 169.254.17.5\n\
			192.168.1.0/24 dev rmnet_data1 proto kernel scope link src 10.32.14.2";
		let candidates = route_candidates(output, &config.route_pattern);
		assert_eq!(1, candidates.len());
		assert_eq!("rmnet_data1", candidates[0].interface);
	}

	#[test]
	fn test_interface_strategy_after_route_failure() {
		init_log();
		let shell = FakeShell::default()
			.with_response("ip route", "")
			.with_response("ip -f inet addr show wlan0", "Device \"wlan0\" does not exist.")
			.with_response(
				"ip -f inet addr show wlan1",
				"5: wlan1: <BROADCAST,MULTICAST,UP>\n    inet 10.0.0.5/24 brd 10.0.0.255 scope global wlan1",
			);
		let config = ClientConfig::default();

		let ip = resolve_ip_address(&shell, &config).expect("expected address");
		assert_eq!("10.0.0.5", ip);
		assert_eq!(
			vec![
				"ip route".to_string(),
				"ip -f inet addr show wlan0".to_string(),
				"ip -f inet addr show wlan1".to_string(),
			],
			shell.calls()
		);
	}

	#[test]
	fn test_netcfg_strategy() {
		init_log();
		let shell = FakeShell::default()
			.with_response("ip route", "")
			.with_response("ip -f inet addr show wlan0", "")
			.with_response("ip -f inet addr show wlan1", "")
			.with_response("ip -f inet addr show eth0", "")
			.with_response(
				"netcfg",
				"lo       UP 127.0.0.1/8   0x00000049\nwlan0    UP 192.168.1.100/24 0x00001043",
			);
		let config = ClientConfig::default();

		let ip = resolve_ip_address(&shell, &config).expect("expected address");
		assert_eq!("192.168.1.100", ip);
	}

	#[test]
	fn test_ifconfig_strategy_is_last() {
		init_log();
		let shell = FakeShell::default()
			.with_response("ifconfig wlan0", "wlan0: inet addr:192.168.1.33  Bcast:192.168.1.255");
		let config = ClientConfig::default();

		let ip = resolve_ip_address(&shell, &config).expect("expected address");
		assert_eq!("192.168.1.33", ip);
		// everything before ifconfig was still attempted, in order
		assert_eq!(
			vec![
				"ip route".to_string(),
				"ip -f inet addr show wlan0".to_string(),
				"ip -f inet addr show wlan1".to_string(),
				"ip -f inet addr show eth0".to_string(),
				"netcfg".to_string(),
				"ifconfig wlan0".to_string(),
			],
			shell.calls()
		);
	}

	#[test]
	fn test_all_strategies_exhaust() {
		init_log();
		let shell = FakeShell::default();
		let config = ClientConfig::default();

		let err = resolve_ip_address(&shell, &config).expect_err("expected failure");
		let message = err.to_string();
		assert!(message.starts_with("resolve ip address:"), "unexpected message: {message}");

		let calls = shell.calls();
		assert!(calls.contains(&"ip route".to_string()));
		assert!(calls.contains(&"ip -f inet addr show eth0".to_string()));
		assert!(calls.contains(&"netcfg".to_string()));
		assert!(calls.contains(&"ifconfig wlan0".to_string()));
		assert_eq!(6, calls.len());
	}

	#[test]
	fn test_link_local_rejected_everywhere() {
		init_log();
		let shell = FakeShell::default()
			.with_response("ip route", "169.254.0.0/16 dev wlan0 proto kernel scope link src 169.254.17.5")
			.with_response(
				"ip -f inet addr show wlan0",
				"4: wlan0: <BROADCAST,MULTICAST,UP>\n    inet 169.254.17.5/16 scope global wlan0",
			)
			.with_response("ip -f inet addr show wlan1", "")
			.with_response("ip -f inet addr show eth0", "")
			.with_response("netcfg", "wlan0    UP 169.254.17.5/16 0x00001043")
			.with_response("ifconfig wlan0", "wlan0: inet addr:169.254.17.5  Bcast:169.254.255.255");
		let config = ClientConfig::default();

		resolve_ip_address(&shell, &config).expect_err("link-local must never resolve");
	}

	#[test]
	fn test_priority_ordering() {
		let candidate = |interface: &str| AddressCandidate {
			interface: interface.to_string(),
			ip: "192.168.1.1".to_string(),
		};
		assert_eq!(0, candidate("wlan0").priority());
		assert_eq!(0, candidate("wlan12").priority());
		assert_eq!(1, candidate("rmnet_data3").priority());
		assert_eq!(2, candidate("eth0").priority());
		assert_eq!(3, candidate("lo").priority());
		assert_eq!(3, candidate("rmnet0").priority());
	}
}
