use clap::{ArgGroup, Parser};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
	#[error("invalid argument: {0}")]
	Invalid(String),

	#[error("no digits were found")]
	NoDigits,

	#[error("range error: {0}")]
	Range(String),

	#[error("invalid device id: {0} > {max}", max = u8::MAX)]
	DeviceId(u32),
}

/// Parses decimal or `0x`-prefixed hexadecimal. The argument has to start
/// with a digit and consist of digits of its radix only.
pub fn parse_number(arg: &str) -> Result<u32, ArgumentError> {
	if !arg.starts_with(|c: char| c.is_ascii_digit()) {
		return Err(ArgumentError::Invalid(arg.to_owned()));
	}

	let (digits, radix) = match arg.strip_prefix("0x") {
		Some(hex) => (hex, 16),
		None => (arg, 10),
	};

	if digits.is_empty() {
		return Err(ArgumentError::NoDigits);
	}

	if !digits.chars().all(|c| c.is_digit(radix)) {
		return Err(ArgumentError::Invalid(arg.to_owned()));
	}

	u32::from_str_radix(digits, radix).map_err(|_| ArgumentError::Range(arg.to_owned()))
}

pub fn parse_device_id(arg: &str) -> Result<u8, ArgumentError> {
	let value = parse_number(arg)?;
	u8::try_from(value).map_err(|_| ArgumentError::DeviceId(value))
}

/// CLI to query and modify serial number and device id of PEAK CAN USB adapters
#[derive(Debug, Parser)]
#[command(name = "pcan-id", version)]
#[command(group(ArgGroup::new("action").required(true).args(["device_id", "serial_number", "list", "query"])))]
pub struct Cli {
	/// Device index
	#[arg(short = 'd', value_name = "NUMBER", default_value = "0", value_parser = parse_number)]
	pub index: u32,

	/// Set device id
	#[arg(short = 'i', value_name = "NUMBER", value_parser = parse_device_id)]
	pub device_id: Option<u8>,

	/// Set serial number
	#[arg(short = 's', value_name = "NUMBER", value_parser = parse_number)]
	pub serial_number: Option<u32>,

	/// List devices
	#[arg(short = 'l')]
	pub list: bool,

	/// Query serial number and device id
	#[arg(short = 'q')]
	pub query: bool,
}

/// Help and version requests exit 0, every other parse error exits 1 with the
/// usage on stderr
pub fn exit_status(err: &clap::Error) -> u8 {
	u8::from(err.use_stderr())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
	List,
	Device(Command),
}

/// Actions that need an opened device
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
	Query,
	SetDeviceId(u8),
	SetSerialNumber(u32),
}

impl Cli {
	/// `None` only if the parser's action group was bypassed
	pub fn action(&self) -> Option<Action> {
		if self.list {
			return Some(Action::List);
		}

		if self.query {
			return Some(Action::Device(Command::Query));
		}

		self.device_id
			.map(Command::SetDeviceId)
			.or(self.serial_number.map(Command::SetSerialNumber))
			.map(Action::Device)
	}
}
