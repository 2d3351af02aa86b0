use std::{future::Future, time::Duration};

use async_io::Timer;
use futures_lite::future;
use nusb::transfer::RequestBuffer;

use crate::TransferError;

/// Bulk transfers over a claimed interface
///
/// Both directions report the number of bytes actually moved. Implemented for
/// [`nusb::Interface`]; anything else implementing it can stand in for real
/// hardware.
#[allow(async_fn_in_trait)]
pub trait Transport {
	async fn bulk_out(&self, endpoint: u8, data: &[u8], timeout: Duration) -> Result<usize, TransferError>;

	/// Fills `buf` from the front with whatever the device returned
	async fn bulk_in(&self, endpoint: u8, buf: &mut [u8], timeout: Duration) -> Result<usize, TransferError>;
}

impl Transport for nusb::Interface {
	async fn bulk_out(&self, endpoint: u8, data: &[u8], timeout: Duration) -> Result<usize, TransferError> {
		let completion = deadline(nusb::Interface::bulk_out(self, endpoint, data.to_vec()), timeout).await?;
		completion.status?;

		Ok(completion.data.actual_length())
	}

	async fn bulk_in(&self, endpoint: u8, buf: &mut [u8], timeout: Duration) -> Result<usize, TransferError> {
		let request = RequestBuffer::new(buf.len());
		let completion = deadline(nusb::Interface::bulk_in(self, endpoint, request), timeout).await?;
		completion.status?;

		let len = completion.data.len().min(buf.len());
		buf[..len].copy_from_slice(&completion.data[..len]);

		Ok(len)
	}
}

/// Races `transfer` against a timer. Losing the race drops the transfer
/// future, which cancels the pending transfer.
async fn deadline<T>(transfer: impl Future<Output = T>, timeout: Duration) -> Result<T, TransferError> {
	future::or(async { Ok(transfer.await) }, async {
		Timer::after(timeout).await;
		Err(TransferError::Timeout(timeout))
	})
	.await
}
