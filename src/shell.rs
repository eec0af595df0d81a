use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;

use simple_cmd::CommandBuilder;

use crate::net;
use crate::prelude::CommandBuilderExt;
use crate::result::Result;
use crate::traits::ShellExec;
use crate::types::Shell;

impl<'a> Shell<'a> {
	/// Executes a custom command over the shell interface. Transport only:
	/// the output may be empty, truncated or carry device-specific error
	/// phrases; detecting those is the caller's job.
	pub fn exec<T>(&self, args: Vec<T>, timeout: Option<Duration>) -> Result<Output>
	where
		T: Into<String> + AsRef<OsStr>,
	{
		let builder = CommandBuilder::shell(self.parent).args(args).timeout(timeout);
		Ok(builder.build().output()?)
	}

	/// Same as [`Shell::exec`] with stdout decoded to text, bounded by the
	/// configured command timeout unless overridden.
	pub fn exec_output<T>(&self, args: Vec<T>, timeout: Option<Duration>) -> Result<String>
	where
		T: Into<String> + AsRef<OsStr>,
	{
		let timeout = timeout.or(Some(self.parent.config.command_timeout));
		let output = self.exec(args, timeout)?;
		Ok(simple_cmd::Vec8ToString::as_str(&output.stdout).unwrap_or("").to_string())
	}

	/// Resolve the device's usable network address through the strategy
	/// cascade.
	pub fn ip_address(&self) -> Result<String> {
		net::resolve_ip_address(self, &self.parent.config)
	}
}

impl ShellExec for Shell<'_> {
	fn shell_output(&self, args: &[&str], timeout: Duration) -> Result<String> {
		self.exec_output(args.to_vec(), Some(timeout))
	}
}
