use tracing::warn;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Runs a fallible device operation, tagging any failure with the operation
/// label. The original cause stays attached as the error source, so the
/// caller-visible message is never reduced to a generic one.
pub(crate) fn run_operation<T, F>(label: &str, f: F) -> Result<T>
where
	F: FnOnce() -> Result<T>,
{
	f().map_err(|err| {
		warn!("{label} failed: {err}");
		Error::OperationError {
			label: label.to_string(),
			source: Box::new(err),
		}
	})
}

/// Failure-only side-effect hook. Success passes through untouched; on
/// failure the hook observes the error and the original result is returned
/// unchanged. Chaining the next strategy itself is `Result::or_else`.
pub trait ResultExt<T> {
	fn on_error<F>(self, hook: F) -> Result<T>
	where
		F: FnOnce(&Error);
}

impl<T> ResultExt<T> for Result<T> {
	fn on_error<F>(self, hook: F) -> Result<T>
	where
		F: FnOnce(&Error),
	{
		if let Err(ref err) = self {
			hook(err);
		}
		self
	}
}
