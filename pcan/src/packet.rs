use std::fmt::{Debug, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::consts::PACKET_SIZE;

/// Configuration value a packet refers to, carried in byte 0
#[derive(Debug, Copy, Clone, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Object {
	DeviceId = 4,
	SerialNumber = 6,
}

/// Carried in byte 1
#[derive(Debug, Copy, Clone, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Operation {
	Get = 1,
	Set = 2,
}

/// Request or response exchanged over the bulk endpoints
///
/// ```text
/// | 0      | 1         | 2 .. 16                  |
/// | object | operation | payload, zero padded     |
/// ```
///
/// The device id payload is a single byte, the serial number payload is a
/// little-endian `u32`.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Packet([u8; PACKET_SIZE]);

impl Packet {
	const OBJECT: usize = 0;
	const OPERATION: usize = 1;
	const PAYLOAD: usize = 2;

	pub fn new(object: Object, operation: Operation) -> Self {
		let mut bytes = [0u8; PACKET_SIZE];
		bytes[Self::OBJECT] = object.into();
		bytes[Self::OPERATION] = operation.into();

		Self(bytes)
	}

	pub fn get_device_id() -> Self {
		Self::new(Object::DeviceId, Operation::Get)
	}

	pub fn set_device_id(id: u8) -> Self {
		Self::new(Object::DeviceId, Operation::Set).with_payload(&[id])
	}

	pub fn get_serial_number() -> Self {
		Self::new(Object::SerialNumber, Operation::Get)
	}

	pub fn set_serial_number(serial: u32) -> Self {
		Self::new(Object::SerialNumber, Operation::Set).with_payload(&serial.to_le_bytes())
	}

	/// Copies at most [`PACKET_SIZE`] bytes, anything missing stays zero
	pub fn from_bytes(bytes: &[u8]) -> Self {
		let mut packet = Self::default();
		let len = bytes.len().min(PACKET_SIZE);
		packet.0[..len].copy_from_slice(&bytes[..len]);

		packet
	}

	pub fn as_bytes(&self) -> &[u8; PACKET_SIZE] {
		&self.0
	}

	pub fn as_bytes_mut(&mut self) -> &mut [u8; PACKET_SIZE] {
		&mut self.0
	}

	pub fn object(&self) -> Option<Object> {
		Object::try_from(self.0[Self::OBJECT]).ok()
	}

	pub fn operation(&self) -> Option<Operation> {
		Operation::try_from(self.0[Self::OPERATION]).ok()
	}

	pub fn device_id(&self) -> u8 {
		self.0[Self::PAYLOAD]
	}

	pub fn serial_number(&self) -> u32 {
		let mut le = [0u8; 4];
		le.copy_from_slice(&self.0[Self::PAYLOAD..Self::PAYLOAD + 4]);

		u32::from_le_bytes(le)
	}

	fn with_payload(mut self, payload: &[u8]) -> Self {
		self.0[Self::PAYLOAD..Self::PAYLOAD + payload.len()].copy_from_slice(payload);
		self
	}
}

impl AsRef<[u8]> for Packet {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Debug for Packet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Packet [")?;
		for (i, byte) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{byte:02x}")?;
		}
		write!(f, "]")
	}
}
