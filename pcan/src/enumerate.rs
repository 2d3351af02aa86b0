//! Finding supported adapters among the devices attached to the host
//!
//! Indices are assigned to catalog matches only, in the order the host reports
//! devices. That order is not guaranteed to be stable across runs.

use std::fmt::{Display, Formatter};

use nusb::DeviceInfo;

use crate::{Error, Model, Result, catalog};

/// What the enumerator needs to know about an attached device
pub trait Descriptor {
	fn vendor_id(&self) -> u16;
	fn product_id(&self) -> u16;
	fn bus_number(&self) -> u8;
	fn device_address(&self) -> u8;
}

impl Descriptor for DeviceInfo {
	fn vendor_id(&self) -> u16 {
		DeviceInfo::vendor_id(self)
	}

	fn product_id(&self) -> u16 {
		DeviceInfo::product_id(self)
	}

	fn bus_number(&self) -> u8 {
		DeviceInfo::bus_number(self)
	}

	fn device_address(&self) -> u8 {
		DeviceInfo::device_address(self)
	}
}

/// A supported device together with its position among all supported devices
#[derive(Debug, Clone)]
pub struct Match<D> {
	pub index: u32,
	pub model: &'static Model,
	pub info: D,
}

impl<D: Descriptor> Display for Match<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}: {:04x}:{:04x} Bus {:03} Device {:03} \"{}\"",
			self.index,
			self.info.vendor_id(),
			self.info.product_id(),
			self.info.bus_number(),
			self.info.device_address(),
			self.model.name,
		)
	}
}

/// Devices currently attached to the host
pub fn system_devices() -> Result<impl Iterator<Item = DeviceInfo>> {
	nusb::list_devices().map_err(Error::Enumeration)
}

pub fn matches<D: Descriptor>(devices: impl IntoIterator<Item = D>) -> impl Iterator<Item = Match<D>> {
	devices
		.into_iter()
		.filter_map(|info| catalog::lookup(info.vendor_id(), info.product_id()).map(|model| (model, info)))
		.zip(0..)
		.map(|((model, info), index)| Match { index, model, info })
}

pub fn list<D: Descriptor>(devices: impl IntoIterator<Item = D>) -> Vec<Match<D>> {
	matches(devices).collect()
}

pub fn select<D: Descriptor>(devices: impl IntoIterator<Item = D>, index: u32) -> Result<Match<D>> {
	matches(devices).find(|found| found.index == index).ok_or(Error::NotFound { index })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Clone, Copy)]
	struct Fake {
		vendor_id: u16,
		product_id: u16,
		bus: u8,
		address: u8,
	}

	impl Descriptor for Fake {
		fn vendor_id(&self) -> u16 {
			self.vendor_id
		}

		fn product_id(&self) -> u16 {
			self.product_id
		}

		fn bus_number(&self) -> u8 {
			self.bus
		}

		fn device_address(&self) -> u8 {
			self.address
		}
	}

	fn pcan(bus: u8, address: u8) -> Fake {
		Fake { vendor_id: 0x0c72, product_id: 0x000c, bus, address }
	}

	fn other(vendor_id: u16, product_id: u16) -> Fake {
		Fake { vendor_id, product_id, bus: 1, address: 1 }
	}

	fn bus() -> Vec<Fake> {
		vec![other(0x1d6b, 0x0002), pcan(1, 4), other(0x046d, 0xc52b), other(0x0c72, 0x0014), pcan(3, 9)]
	}

	#[test]
	fn only_catalog_members_get_indices() {
		let found = list(bus());

		assert_eq!(found.len(), 2);
		assert_eq!(found[0].index, 0);
		assert_eq!((found[0].info.bus, found[0].info.address), (1, 4));
		assert_eq!(found[1].index, 1);
		assert_eq!((found[1].info.bus, found[1].info.address), (3, 9));
	}

	#[test]
	fn listing_line_format() {
		let found = list(bus());

		assert_eq!(found[0].to_string(), "0: 0c72:000c Bus 001 Device 004 \"PCAN-USB\"");
		assert_eq!(found[1].to_string(), "1: 0c72:000c Bus 003 Device 009 \"PCAN-USB\"");
	}

	#[test]
	fn select_skips_unsupported_devices() {
		let selected = select(bus(), 1).expect("second adapter");
		assert_eq!(selected.index, 1);
		assert_eq!(selected.info.address, 9);
	}

	#[test]
	fn select_past_last_match_is_not_found() {
		assert!(matches!(select(bus(), 2), Err(Error::NotFound { index: 2 })));
	}

	#[test]
	fn select_without_matches_is_not_found() {
		let nothing_supported = vec![other(0x1d6b, 0x0003), other(0x8087, 0x0026)];

		assert!(matches!(select(nothing_supported, 0), Err(Error::NotFound { index: 0 })));
		assert!(matches!(select(Vec::<Fake>::new(), 0), Err(Error::NotFound { index: 0 })));
		assert!(list(Vec::<Fake>::new()).is_empty());
	}
}
