use std::{
	fmt::{Debug, Formatter},
	ops::Deref,
	thread,
	time::{Duration, Instant},
};

use nusb::DeviceInfo;
use tracing::{debug, trace, warn};

use crate::{
	Error, Host, Model, Packet, Result, TransferError, Transport, UsbHost,
	consts::{ENDPOINT_IN, ENDPOINT_OUT, INTERFACE, RESET_POLL, RESET_SETTLE, TIMEOUT},
	enumerate::{Descriptor, Match},
};

/// Request/response protocol of a PCAN adapter on top of a [`Transport`]
pub struct Device<T> {
	transport: T,
	timeout: Duration,
}

impl<T> Debug for Device<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Device").field("timeout", &self.timeout).finish_non_exhaustive()
	}
}

/// Value read back from the device together with every transfer that failed
/// while reading it.
///
/// A failed exchange still yields a value, decoded from a zero-filled packet
/// overlaid with whatever did arrive.
#[derive(Debug)]
pub struct Query<T> {
	pub value: T,
	pub errors: Vec<TransferError>,
}

impl<T> Query<T> {
	pub fn is_complete(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Query<U> {
		Query { value: f(self.value), errors: self.errors }
	}
}

impl<T: Transport> Device<T> {
	pub fn from_transport(transport: T) -> Self {
		Self { transport, timeout: TIMEOUT }
	}

	pub fn into_transport(self) -> T {
		self.transport
	}

	pub async fn send(&self, packet: &Packet) -> Result<usize, TransferError> {
		let sent = self.transport.bulk_out(ENDPOINT_OUT, packet.as_bytes(), self.timeout).await?;
		trace!(?packet, sent, "Request sent");

		Ok(sent)
	}

	pub async fn receive(&self) -> Result<Packet, TransferError> {
		let mut packet = Packet::default();
		let received = self.transport.bulk_in(ENDPOINT_IN, packet.as_bytes_mut(), self.timeout).await?;
		trace!(?packet, received, "Response received");

		Ok(packet)
	}

	/// Writes the device id. The device sends no response.
	pub async fn set_device_id(&self, id: u8) -> Result<(), TransferError> {
		self.send(&Packet::set_device_id(id)).await.map(drop)
	}

	/// Writes the serial number. The device sends no response.
	pub async fn set_serial_number(&self, serial: u32) -> Result<(), TransferError> {
		self.send(&Packet::set_serial_number(serial)).await.map(drop)
	}

	pub async fn device_id(&self) -> Query<u8> {
		self.exchange(Packet::get_device_id()).await.map(|response| response.device_id())
	}

	pub async fn serial_number(&self) -> Query<u32> {
		self.exchange(Packet::get_serial_number()).await.map(|response| response.serial_number())
	}

	/// The response is read even if sending the request failed
	async fn exchange(&self, request: Packet) -> Query<Packet> {
		let mut errors = Vec::new();

		if let Err(err) = self.send(&request).await {
			errors.push(err);
		}

		let response = match self.receive().await {
			Ok(it) => {
				if it.object() != request.object() || it.operation() != request.operation() {
					debug!(?request, response = ?it, "Response header does not echo the request");
				}
				it
			}
			Err(err) => {
				errors.push(err);
				Packet::default()
			}
		};

		Query { value: response, errors }
	}
}

/// Exclusively opened adapter with its interface claimed
///
/// Dropping the session releases the interface and then closes the device,
/// whichever way the caller leaves.
pub struct Session<H: Host = UsbHost> {
	device: Device<H::Interface>,
	handle: H::Handle,
	info: H::Info,
	model: &'static Model,
}

impl Session {
	/// [`Session::open_with`] on the host's USB stack
	pub fn open(selected: Match<DeviceInfo>) -> Result<Self> {
		Self::open_with(&UsbHost, selected)
	}

	pub fn manufacturer(&self) -> Option<&str> {
		self.info.manufacturer_string()
	}

	pub fn product(&self) -> Option<&str> {
		self.info.product_string()
	}
}

impl<H: Host> Session<H> {
	/// Resets the adapter, then reopens it and claims its interface
	///
	/// A reset leaves the handle it was issued on unusable, so that handle is
	/// dropped and the device is looked up again before the interface is
	/// claimed on a fresh one. Reset failures are only logged.
	pub fn open_with(host: &H, selected: Match<H::Info>) -> Result<Self> {
		let Match { index, model, info } = selected;

		let handle = host.open(&info).map_err(Error::Open)?;
		if let Err(err) = host.reset(&handle) {
			warn!(%err, "Device reset failed");
		}
		drop(handle);

		let info = rediscover(host, &info)?;
		let handle = host.open(&info).map_err(Error::Open)?;
		let interface = host
			.claim(&handle, INTERFACE)
			.map_err(|source| Error::Claim { interface: INTERFACE, source })?;

		debug!(index, model = model.name, bus = info.bus_number(), address = info.device_address(), "Device opened");

		Ok(Self { device: Device::from_transport(interface), handle, info, model })
	}

	pub fn device(&self) -> &Device<H::Interface> {
		&self.device
	}

	pub fn handle(&self) -> &H::Handle {
		&self.handle
	}

	pub fn model(&self) -> &'static Model {
		self.model
	}
}

fn rediscover<H: Host>(host: &H, info: &H::Info) -> Result<H::Info> {
	let deadline = Instant::now() + RESET_SETTLE;

	loop {
		if let Some(found) = host.rediscover(info).map_err(Error::Enumeration)? {
			return Ok(found);
		}

		if Instant::now() >= deadline {
			return Err(Error::Lost);
		}

		thread::sleep(RESET_POLL);
	}
}

impl<H: Host> Deref for Session<H> {
	type Target = Device<H::Interface>;

	fn deref(&self) -> &Self::Target {
		&self.device
	}
}

impl<H: Host> Debug for Session<H> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("model", &self.model.name)
			.field("bus", &self.info.bus_number())
			.field("address", &self.info.device_address())
			.finish_non_exhaustive()
	}
}

impl<H: Host> Drop for Session<H> {
	// Fields drop in declaration order: the interface goes before the handle.
	fn drop(&mut self) {
		debug!(bus = self.info.bus_number(), address = self.info.device_address(), "Releasing interface and closing device");
	}
}
