// region DisplaySize

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;
use crate::types::{DeviceEntry, DisplaySize};

impl Display for DisplaySize {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}

impl FromStr for DisplaySize {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (width, height) = s
			.split_once('x')
			.ok_or_else(|| Error::parse("expected WxH", s))?;
		let width = width.trim().parse().map_err(|_| Error::parse("invalid width", s))?;
		let height = height.trim().parse().map_err(|_| Error::parse("invalid height", s))?;
		Ok(DisplaySize { width, height })
	}
}

// endregion DisplaySize

// region DeviceEntry

impl Display for DeviceEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.serial, self.state)
	}
}

// endregion DeviceEntry

#[cfg(test)]
mod test {
	use std::str::FromStr;

	use crate::types::{DeviceState, DisplaySize};

	#[test]
	fn test_display_size_round_trip() {
		let size = DisplaySize::new(480, 800);
		assert_eq!("480x800", size.to_string());
		assert_eq!(size, DisplaySize::from_str("480x800").unwrap());

		DisplaySize::from_str("480").expect_err("missing separator must not parse");
		DisplaySize::from_str("480xabc").expect_err("non-numeric height must not parse");
	}

	#[test]
	fn test_device_state_from_str() {
		assert_eq!(DeviceState::Device, "device".parse().unwrap());
		assert_eq!(DeviceState::Offline, "offline".parse().unwrap());
		assert_eq!(DeviceState::Unauthorized, "unauthorized".parse().unwrap());
		assert!("flying".parse::<DeviceState>().is_err());
	}
}
