#![doc = include_str!("../../readme.md")]

pub mod catalog;
mod consts;
pub mod device;
pub mod enumerate;
mod err;
pub mod host;
pub mod packet;
pub mod transport;

pub use catalog::Model;
pub use consts::*;
pub use device::{Device, Query, Session};
pub use err::{Error, Result, TransferError};
pub use host::{Host, UsbHost};
pub use nusb;
pub use packet::Packet;
pub use transport::Transport;
