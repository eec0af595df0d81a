use std::net::AddrParseError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Failed to parse address")]
	AddressParseError,

	#[error(transparent)]
	WhichError(#[from] which::Error),

	#[error(transparent)]
	CommandError(#[from] simple_cmd::Error),

	#[error(transparent)]
	IoError(#[from] std::io::Error),

	#[error(transparent)]
	RegexError(#[from] regex::Error),

	#[error("Invalid connection type")]
	InvalidConnectionTypeError,

	#[error("port out of range [{min}, {max}]: {port}")]
	InvalidPortError { port: u16, min: u16, max: u16 },

	#[error("{message}; output: {output:?}")]
	ParseError { message: String, output: String },

	#[error("no usable ip address: {0}")]
	NoUsableAddressError(String),

	#[error("{label}: {source}")]
	OperationError {
		label: String,
		#[source]
		source: Box<Error>,
	},
}

impl From<AddrParseError> for Error {
	fn from(_value: AddrParseError) -> Self {
		Error::AddressParseError
	}
}

impl Error {
	/// Error for an expected pattern missing from command output; the raw
	/// output always travels with the message.
	pub fn parse<M: Into<String>, O: Into<String>>(message: M, output: O) -> Self {
		Error::ParseError {
			message: message.into(),
			output: output.into(),
		}
	}
}
