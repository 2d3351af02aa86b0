use std::time::Duration;

/// Host-to-device bulk endpoint carrying requests
pub const ENDPOINT_OUT: u8 = 0x01;

/// Device-to-host bulk endpoint carrying responses
pub const ENDPOINT_IN: u8 = 0x81;

pub const INTERFACE: u8 = 0;

/// Applied to every single bulk transfer
pub const TIMEOUT: Duration = Duration::from_millis(2000);

pub const PACKET_SIZE: usize = 16;

/// How long a reset device gets to show up again
pub const RESET_SETTLE: Duration = Duration::from_millis(2000);

pub const RESET_POLL: Duration = Duration::from_millis(100);
