//! Adapters this tool knows how to talk to

#[derive(Debug, PartialEq, Eq)]
pub struct Model {
	pub name: &'static str,
	pub vendor_id: u16,
	pub product_id: u16,
}

/// `vendor_id` of PEAK-System Technik
pub const PEAK_VENDOR_ID: u16 = 0x0c72;

pub static CATALOG: &[Model] = &[Model { name: "PCAN-USB", vendor_id: PEAK_VENDOR_ID, product_id: 0x000c }];

/// Scans [`CATALOG`] top to bottom, the first entry with matching ids wins
pub fn lookup(vendor_id: u16, product_id: u16) -> Option<&'static Model> {
	CATALOG.iter().find(|model| model.vendor_id == vendor_id && model.product_id == product_id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_entry_is_found_by_its_ids() {
		for model in CATALOG {
			assert_eq!(lookup(model.vendor_id, model.product_id), Some(model));
		}
	}

	#[test]
	fn pcan_usb_is_supported() {
		let model = lookup(0x0c72, 0x000c).expect("PCAN-USB in catalog");
		assert_eq!(model.name, "PCAN-USB");
	}

	#[test]
	fn foreign_ids_are_rejected() {
		assert_eq!(lookup(0x1d50, 0x6089), None);
		assert_eq!(lookup(PEAK_VENDOR_ID, 0xffff), None);
		assert_eq!(lookup(0x0000, 0x000c), None);
	}
}
