use std::{io, time::Duration};

use thiserror::Error;

pub type Result<T = (), E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Error retrieving list of devices: {0}")]
	Enumeration(io::Error),

	#[error("Requested device {index} not found")]
	NotFound { index: u32 },

	#[error("Error opening device: {0}")]
	Open(io::Error),

	#[error("Failed to claim interface {interface}: {source}")]
	Claim { interface: u8, source: io::Error },

	#[error("Device did not come back after reset")]
	Lost,
}

#[derive(Debug, Error)]
pub enum TransferError {
	#[error("{0}")]
	Usb(#[from] nusb::transfer::TransferError),

	#[error("Timed out after {}ms", .0.as_millis())]
	Timeout(Duration),
}
