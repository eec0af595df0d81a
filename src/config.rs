use std::time::Duration;

use regex::Regex;

/// Immutable knobs shared by every operation: timeouts, settle delays, port
/// bounds, probe interfaces and the output patterns for each parser. One
/// instance travels with each [`crate::types::Client`]; nothing is global.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Hard bound for a single device shell command.
	pub command_timeout: Duration,
	/// Hard bound for the host-side `adb connect` attempt.
	pub connection_timeout: Duration,
	/// Bound for the best-effort `adb disconnect` issued before connecting.
	pub disconnect_timeout: Duration,
	/// Settle time after the disconnect, before the connect attempt.
	pub disconnect_settle: Duration,
	/// Settle time between a classified-successful connect and its re-check.
	pub verify_delay: Duration,
	/// Settle time after `setprop service.adb.tcp.port`.
	pub property_settle_delay: Duration,
	/// Settle time after `stop adbd`.
	pub daemon_stop_delay: Duration,
	/// Settle time after `start adbd`, before the daemon accepts commands.
	pub daemon_start_delay: Duration,
	/// Settle time after the fallback `tcpip` command.
	pub tcpip_settle_delay: Duration,

	pub min_adb_port: u16,
	pub max_port: u16,

	/// Interfaces probed in order by the per-interface strategy.
	pub wifi_interfaces: Vec<String>,

	/// `ip route` line: `192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.20`
	pub route_pattern: Regex,
	/// `ip -f inet addr show <iface>` line: `inet 192.168.1.20/24 brd ...`
	pub inet_pattern: Regex,
	/// `netcfg` line: `wlan0 UP 192.168.1.100/24 0x00001043`
	pub netcfg_pattern: Regex,
	/// `ifconfig wlan0` line: `inet addr:192.168.1.20  Bcast:...`
	pub ifconfig_pattern: Regex,
	/// `wm size` line: `Physical size: 1080x1920` / `Override size: 480x800`
	pub size_pattern: Regex,
	/// `wm density` line: `Physical density: 480` / `Override density: 160`
	pub density_pattern: Regex,
}

const IPV4: &str = r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})";

impl Default for ClientConfig {
	fn default() -> Self {
		ClientConfig {
			command_timeout: Duration::from_secs(5),
			connection_timeout: Duration::from_secs(10),
			disconnect_timeout: Duration::from_secs(2),
			disconnect_settle: Duration::from_millis(1000),
			verify_delay: Duration::from_millis(1000),
			property_settle_delay: Duration::from_millis(500),
			daemon_stop_delay: Duration::from_millis(500),
			daemon_start_delay: Duration::from_millis(1500),
			tcpip_settle_delay: Duration::from_millis(2000),
			min_adb_port: 1024,
			max_port: u16::MAX,
			wifi_interfaces: vec![
				"wlan0".to_string(),
				"wlan1".to_string(),
				"eth0".to_string(),
			],
			route_pattern: Regex::new(&format!(r"\bdev\s+(\S+).*\bsrc\s+{IPV4}\b")).unwrap(),
			inet_pattern: Regex::new(&format!(r"inet\s+{IPV4}")).unwrap(),
			netcfg_pattern: Regex::new(&format!(r"(?m)^wlan\d+\s+UP\s+{IPV4}")).unwrap(),
			ifconfig_pattern: Regex::new(&format!(r"inet addr:\s*{IPV4}")).unwrap(),
			size_pattern: Regex::new(r"(?:Physical|Override) size:\s*(\d+)x(\d+)").unwrap(),
			density_pattern: Regex::new(r"(?:Physical|Override) density:\s*(\d+)").unwrap(),
		}
	}
}
