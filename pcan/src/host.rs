//! Host USB stack calls needed to bring an adapter up

use std::io;

use nusb::DeviceInfo;

use crate::{Transport, enumerate::Descriptor};

/// Open, reset and claim, plus finding a device again once a reset made the
/// old handle unusable
pub trait Host {
	type Info: Descriptor;
	type Handle;
	type Interface: Transport;

	fn open(&self, info: &Self::Info) -> io::Result<Self::Handle>;

	/// Leaves `handle` unusable, it has to be dropped afterwards
	fn reset(&self, handle: &Self::Handle) -> io::Result<()>;

	fn claim(&self, handle: &Self::Handle, interface: u8) -> io::Result<Self::Interface>;

	/// The device `info` described, as currently attached, if it is back
	fn rediscover(&self, info: &Self::Info) -> io::Result<Option<Self::Info>>;
}

/// [`Host`] backed by `nusb`
#[derive(Debug, Default, Copy, Clone)]
pub struct UsbHost;

impl Host for UsbHost {
	type Info = DeviceInfo;
	type Handle = nusb::Device;
	type Interface = nusb::Interface;

	fn open(&self, info: &DeviceInfo) -> io::Result<nusb::Device> {
		info.open()
	}

	fn reset(&self, handle: &nusb::Device) -> io::Result<()> {
		handle.reset()
	}

	/// Detaches a bound kernel driver where the platform allows it. `nusb`
	/// re-attaches it when the interface is released.
	fn claim(&self, handle: &nusb::Device, interface: u8) -> io::Result<nusb::Interface> {
		handle.detach_and_claim_interface(interface)
	}

	/// Same bus and ids. The same address is preferred, a single candidate on
	/// the bus is accepted if the address changed.
	fn rediscover(&self, info: &DeviceInfo) -> io::Result<Option<DeviceInfo>> {
		let mut candidates: Vec<DeviceInfo> = nusb::list_devices()?
			.filter(|found| {
				found.bus_number() == info.bus_number()
					&& found.vendor_id() == info.vendor_id()
					&& found.product_id() == info.product_id()
			})
			.collect();

		if let Some(pos) = candidates.iter().position(|found| found.device_address() == info.device_address()) {
			return Ok(Some(candidates.swap_remove(pos)));
		}

		Ok(if candidates.len() == 1 { candidates.pop() } else { None })
	}
}
