pub const DEFAULT_INTERFACE: &str = "eth0";
pub const DEFAULT_INTERVAL_MS: u64 = 100;
pub const DEFAULT_PACKET_SIZE: usize = 0;
pub const DEFAULT_COUNT: i64 = -1;
pub const DEFAULT_DST_MAC: &str = "12:23:34:45:56:67";
pub const DEFAULT_ETHER_PROTO: &str = "0x8951";
pub const DEFAULT_DATA: &str = "hello";

/// Length of the Ethernet header: destination + source + ethertype.
pub const ETH_HDR_LEN: usize = 14;
