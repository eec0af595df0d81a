use regex::Regex;
use tracing::debug;

use crate::error::Error;
use crate::result::{run_operation, Result};
use crate::types::{DisplaySize, Shell};

/// Display size/density operations over `wm`. Mutations are fire-and-confirm:
/// completing the shell execution is success, output is not inspected.
impl Shell<'_> {
	pub fn size(&self) -> Result<DisplaySize> {
		run_operation("get current size", || {
			let output = self.exec_output(vec!["wm", "size"], None)?;
			let size = parse_size(&output, &self.parent.config.size_pattern)?;
			debug!("current size: {size}");
			Ok(size)
		})
	}

	pub fn density(&self) -> Result<u16> {
		run_operation("get current density", || {
			let output = self.exec_output(vec!["wm", "density"], None)?;
			let density = parse_density(&output, &self.parent.config.density_pattern)?;
			debug!("current density: {density}");
			Ok(density)
		})
	}

	pub fn set_size(&self, size: DisplaySize) -> Result<()> {
		run_operation("set size", || {
			self.exec(
				vec![
					"wm".to_string(),
					"size".to_string(),
					size.to_string(),
				],
				Some(self.parent.config.command_timeout),
			)?;
			Ok(())
		})
	}

	pub fn set_density(&self, density: u16) -> Result<()> {
		run_operation("set density", || {
			self.exec(
				vec![
					"wm".to_string(),
					"density".to_string(),
					density.to_string(),
				],
				Some(self.parent.config.command_timeout),
			)?;
			Ok(())
		})
	}

	pub fn reset_size(&self) -> Result<()> {
		run_operation("reset size", || {
			self.exec(vec!["wm", "size", "reset"], Some(self.parent.config.command_timeout))?;
			Ok(())
		})
	}

	pub fn reset_density(&self) -> Result<()> {
		run_operation("reset density", || {
			self.exec(vec!["wm", "density", "reset"], Some(self.parent.config.command_timeout))?;
			Ok(())
		})
	}
}

/// `wm size` prints `Physical size:` first and, when an override is active,
/// `Override size:` after it; the last match is the effective value.
pub(crate) fn parse_size(output: &str, pattern: &Regex) -> Result<DisplaySize> {
	let captures = pattern
		.captures_iter(output)
		.last()
		.ok_or_else(|| Error::parse("could not parse size", output))?;
	let width = captures[1].parse().map_err(|_| Error::parse("invalid width", output))?;
	let height = captures[2].parse().map_err(|_| Error::parse("invalid height", output))?;
	Ok(DisplaySize { width, height })
}

pub(crate) fn parse_density(output: &str, pattern: &Regex) -> Result<u16> {
	let captures = pattern
		.captures_iter(output)
		.last()
		.ok_or_else(|| Error::parse("could not parse density", output))?;
	captures[1].parse().map_err(|_| Error::parse("invalid density", output))
}
