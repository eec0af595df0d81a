use simple_cmd::CommandBuilder;

use crate::traits::AsArgs;
use crate::types::{Adb, Client, ConnectionType};

pub(crate) trait CommandBuilderExt {
	fn addr(self, addr: &ConnectionType) -> Self;

	fn shell(client: &Client) -> CommandBuilder;

	fn adb(adb: &Adb) -> CommandBuilder;
}

impl CommandBuilderExt for CommandBuilder {
	fn addr(self, addr: &ConnectionType) -> Self {
		self.args(addr.as_args())
	}

	fn shell(client: &Client) -> CommandBuilder {
		CommandBuilder::from(client).arg("shell")
	}

	fn adb(adb: &Adb) -> CommandBuilder {
		CommandBuilder::new(adb)
	}
}

impl From<&Client> for CommandBuilder {
	fn from(value: &Client) -> Self {
		CommandBuilder::adb(&value.adb)
			.addr(&value.addr)
			.with_debug(value.debug)
	}
}
