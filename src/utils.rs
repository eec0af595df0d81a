use std::path::PathBuf;

use anyhow::anyhow;

/// Attempt to find the ANDROID_HOME environment variable, verifying the
/// directory actually exists.
pub fn android_home() -> anyhow::Result<PathBuf> {
	match std::env::var("ANDROID_HOME") {
		Ok(path) => {
			let pathbuf = PathBuf::from(path);
			if pathbuf.exists() {
				Ok(pathbuf)
			} else {
				Err(anyhow!("ANDROID_HOME not set or invalid"))
			}
		}
		Err(err) => Err(anyhow::Error::from(err)),
	}
}

/// Attempt to find the adb executable inside the SDK platform-tools
/// directory. Used as a fallback when adb is not on the PATH.
pub fn platform_tools_adb() -> anyhow::Result<PathBuf> {
	let path = android_home()?.join("platform-tools").join("adb");
	if path.exists() {
		Ok(path)
	} else {
		Err(anyhow::Error::msg("adb not found in platform-tools"))
	}
}
