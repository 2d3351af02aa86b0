use std::io::{self, Write};

use pcan::{
	Device, Query, Transport,
	enumerate::{Descriptor, Match},
};
use tracing::{error, info, warn};

use crate::cli::Command;

const LABEL_WIDTH: usize = 20;

pub fn list<D: Descriptor>(out: &mut impl Write, found: &[Match<D>]) -> io::Result<()> {
	if found.is_empty() {
		warn!("No supported devices found");
	}

	for device in found {
		writeln!(out, "{device}")?;
	}

	Ok(())
}

/// Manufacturer and product strings as reported by the device, followed by a
/// blank line
pub fn describe(out: &mut impl Write, manufacturer: Option<&str>, product: Option<&str>) -> io::Result<()> {
	if let Some(manufacturer) = manufacturer {
		writeln!(out, "{:>LABEL_WIDTH$}: {manufacturer}", "iManufacturer")?;
	}

	if let Some(product) = product {
		writeln!(out, "{:>LABEL_WIDTH$}: {product}", "iProduct")?;
	}

	writeln!(out)
}

/// Transfer failures are logged and do not abort the command
pub async fn perform<T: Transport>(out: &mut impl Write, device: &Device<T>, command: Command) -> io::Result<()> {
	match command {
		Command::SetDeviceId(id) => match device.set_device_id(id).await {
			Ok(()) => info!(id, "Device id written"),
			Err(err) => error!(%err, id, "Setting device id failed"),
		},
		Command::SetSerialNumber(serial) => match device.set_serial_number(serial).await {
			Ok(()) => info!(serial, "Serial number written"),
			Err(err) => error!(%err, serial, "Setting serial number failed"),
		},
		Command::Query => {
			let device_id = device.device_id().await;
			report("device_id", &device_id);
			writeln!(out, "{:>LABEL_WIDTH$}: 0x{:x}", "device_id", device_id.value)?;

			let serial_number = device.serial_number().await;
			report("serial_number", &serial_number);
			writeln!(out, "{:>LABEL_WIDTH$}: 0x{:x}", "serial_number", serial_number.value)?;
		}
	}

	Ok(())
}

fn report<T>(field: &str, query: &Query<T>) {
	for err in &query.errors {
		error!(%err, field, "Bulk transfer failed, value may be incomplete");
	}
}
